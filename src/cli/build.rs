//! Build orchestration.
//!
//! Pipeline phases:
//! - **Charsets** - classify the corpus, write bucket files
//! - **Fonts** - run the font subsetting hook
//! - **Prepare** - wipe and recreate the output directory
//! - **Copy** - mirror directories and plain files
//! - **Styles** - primary stylesheet, reflowed variable stylesheet
//! - **Bundle** - rewrite the entry document, write the script bundle
//! - **Scripts** - standalone scripts, minified one by one

use crate::{
    bundle::{self, RoleTable},
    charset,
    config::SiteConfig,
    debug, hooks, log,
    logger::ProgressLine,
    minify::{AssetType, minify_in_place, minify_to_string},
    utils::fs::{copy_dir, copy_file, read_text, reset_dir, write_text},
};
use anyhow::{Context, Result};
use std::time::Instant;

/// Run the full pipeline.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let start = Instant::now();

    if config.charsets.enable {
        charset::generate(config)?;
    }
    hooks::run_fonts_hook(config)?;

    reset_dir(&config.paths.output)?;
    copy_assets(config)?;
    build_primary_stylesheet(config)?;
    if config.reflow.enable {
        build_reflowed_stylesheet(config)?;
    }
    build_entry(config)?;
    build_standalone_scripts(config)?;

    log!(
        "build";
        "done in {:.2}s -> {}",
        start.elapsed().as_secs_f64(),
        config.root_relative(&config.paths.output).display()
    );
    Ok(())
}

/// Only collect the charsets.
pub fn build_charsets(config: &SiteConfig) -> Result<()> {
    charset::generate(config)?;
    Ok(())
}

/// Mirror `[copy].dirs` and copy `[copy].files`.
fn copy_assets(config: &SiteConfig) -> Result<()> {
    let (dirs, files) = (&config.copy.dirs, &config.copy.files);
    let progress = ProgressLine::new("copy", &[("dirs", dirs.len()), ("files", files.len())]);

    let mut copied = 0;
    for dir in dirs {
        copied += copy_dir(&config.paths.source_join(dir), &config.paths.output_join(dir))?;
        progress.inc("dirs");
    }
    for file in files {
        copy_file(&config.paths.source_join(file), &config.paths.output_join(file))?;
        copied += 1;
        progress.inc("files");
    }

    progress.finish();
    debug!("copy"; "{} files copied", copied);
    Ok(())
}

/// Normalize stylesheet followed by the primary stylesheet, minified.
fn build_primary_stylesheet(config: &SiteConfig) -> Result<()> {
    let roles = &config.bundle;
    let mut css = read_text(&config.paths.source_join(&roles.normalize_css))?;
    css.push_str(&read_text(&config.paths.source_join(&roles.primary_css))?);

    let target = config.paths.output_join(&roles.primary_css);
    write_text(&target, css)?;
    minify_in_place(config, AssetType::Css, &target)?;

    log!("bundle"; "{}", roles.primary_css);
    Ok(())
}

/// Minify the variable stylesheet, then move its placeholders back.
fn build_reflowed_stylesheet(config: &SiteConfig) -> Result<()> {
    let reflow = &config.reflow;
    let source = config.paths.source_join(&reflow.stylesheet);

    let minified = minify_to_string(config, AssetType::Css, &source)?;
    let reflowed = bundle::reflow_placeholders(&minified, &reflow.selector)
        .map_err(|e| e.at_path(&source))?;

    write_text(&config.paths.output_join(&reflow.stylesheet), reflowed)?;
    log!("bundle"; "{} (reflowed)", reflow.stylesheet.display());
    Ok(())
}

/// Rewrite the entry document and write the primary script bundle.
fn build_entry(config: &SiteConfig) -> Result<()> {
    let entry = config.paths.entry_path();
    let roles = RoleTable::from(&config.bundle);

    let text = read_text(&entry)?;
    let result = bundle::bundle_entry(&text, &roles, bundle::source_loader(&config.paths.source))
        .map_err(|e| e.at_path(&entry))?;

    if !result.scripts.iter().any(|s| s.path == roles.primary_js) {
        log!(
            "warning";
            "`{}` is not referenced by {}, the bundle will not be loaded",
            roles.primary_js,
            config.paths.entry.display()
        );
    }
    for script in &result.scripts {
        debug!("bundle"; "{}:{} {}", config.paths.entry.display(), script.line, script.path);
    }

    write_text(&config.paths.output_join(&config.paths.entry), &result.document)?;

    let target = config.paths.output_join(&roles.primary_js);
    write_text(&target, &result.bundle)?;
    minify_in_place(config, AssetType::Bundle, &target)
        .with_context(|| format!("failed to minify bundle `{}`", roles.primary_js))?;

    log!(
        "bundle";
        "{} <- {} scripts",
        roles.primary_js,
        result.scripts.len()
    );
    Ok(())
}

/// Copy `[copy].scripts` and minify each on its own.
fn build_standalone_scripts(config: &SiteConfig) -> Result<()> {
    for script in &config.copy.scripts {
        let target = config.paths.output_join(script);
        copy_file(&config.paths.source_join(script), &target)?;
        minify_in_place(config, AssetType::Js, &target)?;
        debug!("minify"; "{}", script.display());
    }
    Ok(())
}
