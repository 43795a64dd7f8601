//! Site configuration management for `sitebake.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Config file discovery, path resolution
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[paths]`        | Source tree, output tree, entry document       |
//! | `[bundle]`       | Asset roles referenced by the entry document   |
//! | `[reflow]`       | Placeholder reflow of the variable stylesheet  |
//! | `[charsets]`     | Character subset buckets for font subsetting   |
//! | `[minify]`       | External or built-in minifiers                 |
//! | `[copy]`         | Directories, files and lone scripts to carry   |
//! | `[hooks.fonts]`  | Font subsetting command                        |

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, resolve_against};

pub use section::{
    BundleConfig, CharsetsConfig, CopyConfig, FontsHookConfig, HooksConfig, MinifyBackend,
    MinifyConfig, PathsConfig, ReflowConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, PathKind};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitebake.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub bundle: BundleConfig,

    #[serde(default)]
    pub reflow: ReflowConfig,

    #[serde(default)]
    pub charsets: CharsetsConfig,

    #[serde(default)]
    pub minify: MinifyConfig,

    #[serde(default)]
    pub copy: CopyConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

impl SiteConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = match find_config_file(&cli.config) {
            Some(path) => path,
            None => bail!(ConfigError::NotFound(cli.config.clone())),
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = crate::utils::fs::normalize_path(&config_path);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.normalize_paths(&root);
        config.apply_command_options(cli);
        config.validate()?;

        crate::debug!("config"; "loaded {}", config.config_path.display());
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the site root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Charsets { verbose } => {
                crate::logger::set_verbose(*verbose);
                // only the classifier runs
                self.minify.enable = false;
                self.reflow.enable = false;
                self.hooks.fonts.enable = false;
            }
            Commands::Init { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.minify.enable, args.minify.as_ref());
        Self::update_option(&mut self.charsets.enable, args.charsets.as_ref());
        Self::update_option(&mut self.hooks.fonts.enable, args.fonts.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve root-relative paths to absolute form.
    ///
    /// Role paths in `[bundle]` and entries in `[copy]`/`[charsets].sources`
    /// stay relative: they are matched against document text or joined with
    /// the source directory later.
    fn normalize_paths(&mut self, root: &Path) {
        let root = crate::utils::fs::normalize_path(root);

        self.paths.source = resolve_against(&root, &self.paths.source);
        self.paths.output = resolve_against(&root, &self.paths.output);
        self.charsets.output = resolve_against(&root, &self.charsets.output);
        if let Some(cwd) = self.hooks.fonts.cwd.take() {
            self.hooks.fonts.cwd = Some(resolve_against(&root, &cwd));
        }

        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        let source = &self.paths.source;

        self.paths.validate(&mut diag);
        if source.is_dir() {
            self.bundle.validate(source, &mut diag);
            self.reflow.validate(source, &mut diag);
            self.charsets.validate(source, &mut diag);
            self.copy.validate(source, &mut diag);
        }
        self.minify.validate(self.get_root(), &mut diag);
        self.hooks.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
