//! `[charsets]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [charsets]
//! enable = true
//! sources = ["pages", "assets/styles"]   # scanned besides the entry document
//! output = "fonts/charsets"              # one `<bucket>.txt` per bucket
//! ```

use crate::config::{ConfigDiagnostics, PathKind};
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Character subset collection.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "charsets")]
pub struct CharsetsConfig {
    /// Collect charsets during `build`.
    #[config(default = "true")]
    pub enable: bool,

    /// Directories scanned (not recursively), relative to `paths.source`.
    #[config(default = r#"["pages", "assets/styles"]"#)]
    pub sources: Vec<PathBuf>,

    /// Directory receiving the bucket files, relative to the project root.
    #[config(default = "fonts/charsets")]
    pub output: PathBuf,
}

impl Default for CharsetsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            sources: vec!["pages".into(), "assets/styles".into()],
            output: "fonts/charsets".into(),
        }
    }
}

impl CharsetsConfig {
    /// Validate source directories against the (normalized) source root.
    pub fn validate(&self, source: &Path, diag: &mut ConfigDiagnostics) {
        for dir in &self.sources {
            diag.require_in(Self::FIELDS.sources, source, dir, PathKind::Dir);
        }
    }
}
