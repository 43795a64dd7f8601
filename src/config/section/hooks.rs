//! `[hooks.fonts]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [hooks.fonts]
//! enable = true
//! command = ["bash", "./build_fonts.sh", "$SITEBAKE_CHARSETS"]
//! cwd = "fonts"
//! ```
//!
//! The fonts hook runs right after the charsets are written, so a subsetting
//! tool can consume them before the output tree is assembled.

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hooks configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Font subsetting hook.
    pub fonts: FontsHookConfig,
}

impl HooksConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.fonts.validate(diag);
    }
}

/// External font subsetting command.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "hooks.fonts")]
pub struct FontsHookConfig {
    /// Run the hook during `build`.
    pub enable: bool,

    /// Command and arguments; `$SITEBAKE_*` tokens are substituted.
    pub command: Vec<String>,

    /// Working directory, relative to the project root.
    pub cwd: Option<PathBuf>,

    /// Suppress the command's output.
    pub quiet: bool,
}

impl FontsHookConfig {
    /// Display name for logging.
    pub fn display_name(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or("fonts")
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.enable && self.command.is_empty() {
            diag.error(
                Self::FIELDS.command,
                format!(
                    "{} is true but {} is empty",
                    Self::FIELDS.enable,
                    Self::FIELDS.command
                ),
            );
        }
    }
}
