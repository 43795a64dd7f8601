//! `[bundle]` and `[reflow]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bundle]
//! normalize_css = "dep/normalize.css/normalize.css"  # merged into primary_css
//! primary_css = "assets/styles/index.css"            # kept, points at the minified sheet
//! primary_js = "assets/scripts/index.js"             # kept, points at the bundle
//! head_sentinel = "</head>"                          # references stop here
//!
//! [reflow]
//! enable = true
//! stylesheet = "assets/styles/pages.css"
//! selector = ":root"
//! ```
//!
//! Role paths are written exactly as they appear in the entry document's
//! `href`/`src` attributes, relative to `paths.source`.

use crate::config::{ConfigDiagnostics, PathKind};
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known asset roles referenced by the entry document.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "bundle")]
pub struct BundleConfig {
    /// Base normalization stylesheet, merged into `primary_css`.
    #[config(default = "dep/normalize.css/normalize.css")]
    pub normalize_css: String,

    /// Primary stylesheet, minified in place.
    #[config(default = "assets/styles/index.css")]
    pub primary_css: String,

    /// Primary script entry point, replaced by the concatenated bundle.
    #[config(default = "assets/scripts/index.js")]
    pub primary_js: String,

    /// Trimmed line that closes the reference section of the entry document.
    #[config(default = "</head>")]
    pub head_sentinel: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            normalize_css: "dep/normalize.css/normalize.css".into(),
            primary_css: "assets/styles/index.css".into(),
            primary_js: "assets/scripts/index.js".into(),
            head_sentinel: "</head>".into(),
        }
    }
}

impl BundleConfig {
    /// Validate role paths against the (normalized) source directory.
    pub fn validate(&self, source: &Path, diag: &mut ConfigDiagnostics) {
        let roles = [
            (Self::FIELDS.normalize_css, &self.normalize_css),
            (Self::FIELDS.primary_css, &self.primary_css),
            (Self::FIELDS.primary_js, &self.primary_js),
        ];

        for (field, path) in roles {
            if path.is_empty() {
                diag.error(field, format!("{field} must not be empty"));
            } else {
                diag.require_in(field, source, Path::new(path), PathKind::File);
            }
        }

        if self.normalize_css == self.primary_css {
            diag.error(
                Self::FIELDS.primary_css,
                format!(
                    "{} and {} must differ",
                    Self::FIELDS.normalize_css,
                    Self::FIELDS.primary_css
                ),
            );
        }

        if self.head_sentinel.trim().is_empty() {
            diag.error(
                Self::FIELDS.head_sentinel,
                format!("{} must not be blank", Self::FIELDS.head_sentinel),
            );
        }
    }
}

/// Placeholder reflow for the minified variable stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "reflow")]
pub struct ReflowConfig {
    /// Enable the reflow step.
    #[config(default = "true")]
    pub enable: bool,

    /// Stylesheet to minify and reflow, relative to `paths.source`.
    #[config(default = "assets/styles/pages.css")]
    pub stylesheet: PathBuf,

    /// Selector of the rule block holding custom-variable definitions.
    #[config(default = ":root")]
    pub selector: String,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            enable: true,
            stylesheet: "assets/styles/pages.css".into(),
            selector: ":root".into(),
        }
    }
}

impl ReflowConfig {
    /// Validate reflow configuration.
    pub fn validate(&self, source: &Path, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        diag.require_in(Self::FIELDS.stylesheet, source, &self.stylesheet, PathKind::File);

        if self.selector.trim().is_empty() {
            diag.error(
                Self::FIELDS.selector,
                format!("{} is true but {} is blank", Self::FIELDS.enable, Self::FIELDS.selector),
            );
        }
    }
}
