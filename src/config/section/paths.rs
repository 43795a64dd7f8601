//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! source = "html"         # Source document tree
//! output = "output"       # Deployable tree (wiped on every build)
//! entry = "index.html"    # Entry document, relative to `source`
//! ```

use crate::config::{ConfigDiagnostics, PathKind};
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source and output locations.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "paths")]
pub struct PathsConfig {
    /// Source document tree, relative to the project root.
    #[config(default = "html")]
    pub source: PathBuf,

    /// Output tree, relative to the project root.
    #[config(default = "output")]
    pub output: PathBuf,

    /// Entry document, relative to `source`.
    #[config(default = "index.html")]
    pub entry: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: "html".into(),
            output: "output".into(),
            entry: "index.html".into(),
        }
    }
}

impl PathsConfig {
    /// Absolute path of a source-relative file.
    pub fn source_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.source.join(path)
    }

    /// Absolute path of an output-relative file.
    pub fn output_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.output.join(path)
    }

    /// Absolute path of the entry document.
    pub fn entry_path(&self) -> PathBuf {
        self.source.join(&self.entry)
    }

    /// Validate normalized paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !diag.require(Self::FIELDS.source, &self.source, PathKind::Dir) {
            return;
        }
        diag.require(Self::FIELDS.entry, &self.entry_path(), PathKind::File);

        if self.output == self.source || self.source.starts_with(&self.output) {
            diag.error_with_hint(
                Self::FIELDS.output,
                "output directory would contain the source tree",
                "the output directory is removed on every build; point it elsewhere",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_paths_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.paths.source, PathBuf::from("html"));
        assert_eq!(config.paths.output, PathBuf::from("output"));
        assert_eq!(config.paths.entry, PathBuf::from("index.html"));
    }

    #[test]
    fn test_paths_override() {
        let config = test_parse_config("[paths]\nsource = \"site\"\nentry = \"main.html\"");
        assert_eq!(config.paths.source, PathBuf::from("site"));
        assert_eq!(config.paths.entry_path(), PathBuf::from("site/main.html"));
        // output uses default
        assert_eq!(config.paths.output, PathBuf::from("output"));
    }
}
