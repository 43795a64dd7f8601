//! Reference extraction and entry document rewriting.
//!
//! The entry document is scanned line by line up to the head sentinel. Lines
//! matching the fixed `<link>`/`<script>` shapes are classified against the
//! [`RoleTable`]: the normalize stylesheet reference is dropped, the primary
//! stylesheet and primary script references are kept, every other script
//! reference is folded into the bundle and dropped.

use super::transform;
use crate::config::BundleConfig;
use crate::error::BuildError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// `<link href="PATH" rel="stylesheet" type="text/css" />`
static STYLE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<link\s+href="([^"]+)"\s+rel="stylesheet"\s+type="text/css"\s*/?>$"#)
        .unwrap()
});

/// `<script defer src="PATH"></script>`
static SCRIPT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<script\s+defer\s+src="([^"]+)"\s*></script>$"#).unwrap());

/// Placeholder path for errors raised before the caller attaches one.
const ENTRY: &str = "<entry>";

// ============================================================================
// Types
// ============================================================================

/// Well-known asset paths, as written in the entry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    pub normalize_css: String,
    pub primary_css: String,
    pub primary_js: String,
    pub head_sentinel: String,
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::from(&BundleConfig::default())
    }
}

impl From<&BundleConfig> for RoleTable {
    fn from(config: &BundleConfig) -> Self {
        Self {
            normalize_css: config.normalize_css.clone(),
            primary_css: config.primary_css.clone(),
            primary_js: config.primary_js.clone(),
            head_sentinel: config.head_sentinel.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Style,
    Script,
}

/// A reference found in the entry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub kind: AssetKind,
    /// Path exactly as written in the attribute.
    pub path: String,
    /// 1-based line number in the entry document.
    pub line: usize,
}

/// Result of [`rewrite_entry`].
#[derive(Debug, Clone, Default)]
pub struct EntryRewrite {
    pub document: String,
    /// Kept stylesheet references (the primary stylesheet).
    pub styles: Vec<AssetRef>,
    /// Every script reference, in document order.
    pub scripts: Vec<AssetRef>,
}

/// Result of [`bundle_entry`].
#[derive(Debug, Clone, Default)]
pub struct EntryBundle {
    pub document: String,
    pub styles: Vec<AssetRef>,
    pub scripts: Vec<AssetRef>,
    /// Concatenated and transformed scripts, ready for minification.
    pub bundle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    PastHead,
}

// ============================================================================
// Rewriting
// ============================================================================

/// Rewrite the entry document, collecting its asset references.
///
/// Lines keep their original terminators, so a document whose references are
/// already folded comes back byte-identical.
pub fn rewrite_entry(text: &str, roles: &RoleTable) -> Result<EntryRewrite, BuildError> {
    let mut rewrite = EntryRewrite {
        document: String::with_capacity(text.len()),
        ..EntryRewrite::default()
    };
    let mut state = ScanState::Scanning;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        if state == ScanState::PastHead {
            rewrite.document.push_str(line);
            continue;
        }

        let number = index + 1;
        let trimmed = line.trim();

        if trimmed == roles.head_sentinel {
            state = ScanState::PastHead;
            rewrite.document.push_str(line);
            continue;
        }

        if let Some(caps) = STYLE_REF.captures(trimmed) {
            let path = &caps[1];
            if path == roles.normalize_css {
                continue;
            }
            if path != roles.primary_css {
                return Err(BuildError::structural_at(
                    ENTRY,
                    number,
                    format!("unrecognized stylesheet reference `{path}`"),
                ));
            }
            rewrite.styles.push(AssetRef {
                kind: AssetKind::Style,
                path: path.to_owned(),
                line: number,
            });
            rewrite.document.push_str(line);
            continue;
        }

        if let Some(caps) = SCRIPT_REF.captures(trimmed) {
            let path = &caps[1];
            rewrite.scripts.push(AssetRef {
                kind: AssetKind::Script,
                path: path.to_owned(),
                line: number,
            });
            if path == roles.primary_js {
                rewrite.document.push_str(line);
            }
            continue;
        }

        rewrite.document.push_str(line);
    }

    Ok(rewrite)
}

/// Load every script through `loader` and concatenate them in order.
pub fn concat_scripts<F>(scripts: &[AssetRef], mut loader: F) -> Result<String, BuildError>
where
    F: FnMut(&AssetRef) -> Result<String, BuildError>,
{
    let mut bundle = String::new();
    for script in scripts {
        bundle.push_str(&loader(script)?);
    }
    Ok(bundle)
}

/// Normalize the debug flag, then strip build-removal regions.
pub fn finalize_bundle(bundle: &str) -> String {
    let bundle = transform::disable_debug(bundle);
    transform::strip_build_removals(&bundle).into_owned()
}

/// Rewrite the entry document and build its script bundle.
pub fn bundle_entry<F>(text: &str, roles: &RoleTable, loader: F) -> Result<EntryBundle, BuildError>
where
    F: FnMut(&AssetRef) -> Result<String, BuildError>,
{
    let EntryRewrite {
        document,
        styles,
        scripts,
    } = rewrite_entry(text, roles)?;
    let raw = concat_scripts(&scripts, loader)?;

    Ok(EntryBundle {
        document,
        styles,
        scripts,
        bundle: finalize_bundle(&raw),
    })
}

/// Loader reading references relative to `source`.
pub fn source_loader(source: &Path) -> impl FnMut(&AssetRef) -> Result<String, BuildError> + '_ {
    move |asset| crate::utils::fs::read_text(&source.join(&asset.path))
}

// ============================================================================
// Tests
// ============================================================================
