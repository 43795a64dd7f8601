//! Minification of stylesheets and scripts.
//!
//! Two backends:
//! - `external`: configured commands (`cleancss`, `terser`) run through [`Cmd`]
//! - `builtin`: oxc for JavaScript and lightningcss for CSS, in process
//!
//! With `[minify].enable = false` every operation leaves content unchanged.

use crate::config::{MinifyBackend, SiteConfig};
use crate::utils::exec::Cmd;
use crate::utils::fs::{read_text, write_text};
use anyhow::{Context, Result, bail};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use std::path::Path;

/// What is being minified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Css,
    Js,
    /// The primary script bundle; gets `bundle_args` on top of `js`.
    Bundle,
}

impl AssetType {
    fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
            Self::Bundle => "bundle",
        }
    }
}

/// Minify `path`, overwriting it.
pub fn minify_in_place(config: &SiteConfig, kind: AssetType, path: &Path) -> Result<()> {
    if !config.minify.enable {
        return Ok(());
    }
    crate::debug!("minify"; "{} {}", kind.name(), config.root_relative(path).display());

    match config.minify.backend {
        MinifyBackend::External => {
            external(config, kind)?
                .arg("-o")
                .arg(path)
                .arg(path)
                .run()?;
        }
        MinifyBackend::Builtin => {
            let source = read_text(path)?;
            let minified = builtin(kind, &source)
                .with_context(|| format!("failed to minify `{}`", path.display()))?;
            write_text(path, minified)?;
        }
    }
    Ok(())
}

/// Minify `path` and return the result, leaving the file untouched.
pub fn minify_to_string(config: &SiteConfig, kind: AssetType, path: &Path) -> Result<String> {
    if !config.minify.enable {
        return Ok(read_text(path)?);
    }
    crate::debug!("minify"; "{} {}", kind.name(), config.root_relative(path).display());

    match config.minify.backend {
        MinifyBackend::External => {
            let output = external(config, kind)?.arg(path).run()?;
            String::from_utf8(output.stdout)
                .with_context(|| format!("minifier output for `{}` is not UTF-8", path.display()))
        }
        MinifyBackend::Builtin => {
            let source = read_text(path)?;
            builtin(kind, &source)
                .with_context(|| format!("failed to minify `{}`", path.display()))
        }
    }
}

/// Command for `kind`, run from the project root.
fn external(config: &SiteConfig, kind: AssetType) -> Result<Cmd> {
    let minify = &config.minify;
    let (command, extra) = match kind {
        AssetType::Css => (minify.css.as_slice(), &[][..]),
        AssetType::Js => (minify.js.as_slice(), &[][..]),
        AssetType::Bundle => (minify.js.as_slice(), minify.bundle_args.as_slice()),
    };

    if command.is_empty() {
        bail!("no {} minifier command configured", kind.name());
    }

    Ok(Cmd::from_slice(command)
        .args(extra)
        .cwd(config.get_root()))
}

fn builtin(kind: AssetType, source: &str) -> Result<String> {
    let minified = match kind {
        AssetType::Css => minify_css(source),
        AssetType::Js | AssetType::Bundle => minify_js(source),
    };
    match minified {
        Some(code) => Ok(code),
        None => bail!("{} source does not parse", kind.name()),
    }
}

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}
