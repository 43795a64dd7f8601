//! `[copy]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [copy]
//! dirs = ["pages", "assets/fonts", "assets/bgm"]   # mirrored recursively
//! files = ["robots.txt", "favicon.png"]
//! scripts = ["assets/scripts/tech-blocker-1.js"]    # copied, then minified on their own
//! ```
//!
//! All entries are relative to `paths.source` and land at the same relative
//! path under `paths.output`.

use crate::config::{ConfigDiagnostics, PathKind};
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Files and directories carried over verbatim (scripts are minified).
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "copy")]
pub struct CopyConfig {
    /// Directories mirrored into the output tree.
    #[config(default = r#"["pages"]"#)]
    pub dirs: Vec<PathBuf>,

    /// Single files copied as-is.
    pub files: Vec<PathBuf>,

    /// Scripts that must stay out of the bundle; copied and minified one by one.
    pub scripts: Vec<PathBuf>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            dirs: vec!["pages".into()],
            files: Vec::new(),
            scripts: Vec::new(),
        }
    }
}

impl CopyConfig {
    /// Validate entries against the (normalized) source directory.
    pub fn validate(&self, source: &Path, diag: &mut ConfigDiagnostics) {
        let entries = [
            (Self::FIELDS.dirs, &self.dirs, PathKind::Dir),
            (Self::FIELDS.files, &self.files, PathKind::File),
            (Self::FIELDS.scripts, &self.scripts, PathKind::File),
        ];
        for (field, paths, kind) in entries {
            for path in paths {
                diag.require_in(field, source, path, kind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_copy_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.copy.dirs, vec![PathBuf::from("pages")]);
        assert!(config.copy.files.is_empty());
        assert!(config.copy.scripts.is_empty());
    }

    #[test]
    fn test_copy_override() {
        let config = test_parse_config(
            r#"
[copy]
dirs = ["assets/fonts"]
files = ["robots.txt"]
scripts = ["assets/scripts/tech-blocker-1.js", "assets/scripts/tech-blocker-2.js"]
"#,
        );
        assert_eq!(config.copy.dirs, vec![PathBuf::from("assets/fonts")]);
        assert_eq!(config.copy.files, vec![PathBuf::from("robots.txt")]);
        assert_eq!(config.copy.scripts.len(), 2);
    }

    #[test]
    fn test_copy_validate() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("pages")).unwrap();
        std::fs::write(dir.path().join("robots.txt"), "").unwrap();

        let config = CopyConfig {
            dirs: vec!["pages".into(), "/abs".into()],
            files: vec!["robots.txt".into()],
            scripts: vec!["blocker.js".into()],
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(dir.path(), &mut diag);

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field, CopyConfig::FIELDS.dirs);
        assert_eq!(diag.errors()[1].field, CopyConfig::FIELDS.scripts);
    }
}
