//! `[minify]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [minify]
//! enable = true
//! backend = "external"                          # or "builtin" (oxc + lightningcss)
//! css = ["./node_modules/.bin/cleancss"]
//! js = ["./node_modules/.bin/terser", "-c", "-m"]
//! bundle_args = ["--mangle-props", "regex=/^_/"]  # appended for the primary bundle only
//! ```
//!
//! External commands are invoked as `<command...> -o FILE FILE` to minify in
//! place, or `<command...> FILE` when the result is read from stdout.

use crate::config::{ConfigDiagnostics, FieldPath};
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minifier implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyBackend {
    /// External processes (`cleancss`, `terser`, ...).
    #[default]
    External,
    /// In-process oxc (JS) and lightningcss (CSS).
    Builtin,
}

/// Minification settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "minify")]
pub struct MinifyConfig {
    /// Minify outputs (disable to inspect unminified bundles).
    #[config(default = "true")]
    pub enable: bool,

    /// Minifier implementation: "external" or "builtin".
    #[config(default = "external")]
    pub backend: MinifyBackend,

    /// CSS minifier command.
    #[config(default = r#"["./node_modules/.bin/cleancss"]"#)]
    pub css: Vec<String>,

    /// JS minifier command.
    #[config(default = r#"["./node_modules/.bin/terser", "-c", "-m"]"#)]
    pub js: Vec<String>,

    /// Extra arguments for the primary script bundle (external backend only).
    pub bundle_args: Vec<String>,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            enable: true,
            backend: MinifyBackend::External,
            css: vec!["./node_modules/.bin/cleancss".into()],
            js: vec![
                "./node_modules/.bin/terser".into(),
                "-c".into(),
                "-m".into(),
            ],
            bundle_args: Vec::new(),
        }
    }
}

impl MinifyConfig {
    /// Validate external commands.
    ///
    /// # Checks
    /// - If enabled with the external backend:
    ///   - `css` and `js` must not be empty
    ///   - `command[0]` must be installed, or exist relative to `root` when it
    ///     is a path (package runners are only hinted)
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if !self.enable || self.backend == MinifyBackend::Builtin {
            return;
        }

        Self::validate_command(Self::FIELDS.css, &self.css, root, diag);
        Self::validate_command(Self::FIELDS.js, &self.js, root, diag);
    }

    fn validate_command(
        field: FieldPath,
        command: &[String],
        root: &Path,
        diag: &mut ConfigDiagnostics,
    ) {
        let Some(cmd) = command.first() else {
            diag.error(
                field,
                format!("{} is true but {field} is empty", Self::FIELDS.enable),
            );
            return;
        };

        let is_package_runner = ["npx", "bunx", "pnpx", "yarn", "dlx"].contains(&cmd.as_str());
        let found = if cmd.contains('/') {
            root.join(cmd).is_file()
        } else {
            which::which(cmd).is_ok()
        };

        if found {
            return;
        }

        if is_package_runner {
            // Package runners can download packages at runtime, just hint
            if let Some(package) = command.get(1) {
                diag.hint(
                    field,
                    format!("`{package}` via `{cmd}`, ensure package is installed"),
                );
            }
        } else {
            diag.error_with_hint(
                field,
                format!("`{cmd}` not found"),
                format!(
                    "install the command, update {field}, or set {} = \"builtin\"",
                    Self::FIELDS.backend
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_minify_defaults() {
        let config = test_parse_config("");
        assert!(config.minify.enable);
        assert_eq!(config.minify.backend, MinifyBackend::External);
        assert_eq!(config.minify.js, vec!["./node_modules/.bin/terser", "-c", "-m"]);
        assert!(config.minify.bundle_args.is_empty());
    }

    #[test]
    fn test_minify_builtin_backend() {
        let config = test_parse_config("[minify]\nbackend = \"builtin\"");
        assert_eq!(config.minify.backend, MinifyBackend::Builtin);
    }

    #[test]
    fn test_minify_invalid_backend() {
        let content = "[minify]\nbackend = \"uglify\"";
        assert!(toml::from_str::<crate::config::SiteConfig>(content).is_err());
    }

    #[test]
    fn test_validate_skipped_for_builtin() {
        let dir = TempDir::new().unwrap();
        let config = MinifyConfig {
            backend: MinifyBackend::Builtin,
            css: Vec::new(),
            ..MinifyConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(dir.path(), &mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validate_missing_relative_command() {
        let dir = TempDir::new().unwrap();
        let mut diag = ConfigDiagnostics::new();
        MinifyConfig::default().validate(dir.path(), &mut diag);
        // neither ./node_modules/.bin/cleancss nor terser exist in an empty root
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_validate_empty_command() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        std::fs::write(dir.path().join("bin/min"), "").unwrap();

        let config = MinifyConfig {
            css: Vec::new(),
            js: vec!["./bin/min".into()],
            ..MinifyConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(dir.path(), &mut diag);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("is empty"));
    }
}
