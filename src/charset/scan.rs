//! Corpus walk: region splitting and document dispatch.

use super::bucket::CharsetBuckets;
use super::class::Region;
use crate::error::BuildError;
use crate::logger::ProgressLine;
use crate::utils::fs::{list_files, read_text};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Shortest `<blockquote ...>...</blockquote>` span.
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<blockquote(?:\s[^>]*)?>(.*?)</blockquote>").unwrap()
});

static BLOCKQUOTE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<blockquote(?:\s|>)").unwrap());

/// How a document contributes to the buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Blockquote spans go to the sans region, the rest to normal.
    Markup,
    /// Everything goes to both regions.
    Stylesheet,
}

impl DocumentKind {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("css") => Self::Stylesheet,
            _ => Self::Markup,
        }
    }
}

/// Entry document first, then the files directly inside each directory.
///
/// A directory holding a subdirectory fails the run.
pub fn corpus_files(entry: &Path, dirs: &[PathBuf]) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = vec![entry.to_path_buf()];
    for dir in dirs {
        files.extend(list_files(dir)?);
    }
    Ok(files)
}

/// Read and classify every file of the corpus.
pub fn scan_corpus(files: &[PathBuf]) -> Result<CharsetBuckets, BuildError> {
    let mut buckets = CharsetBuckets::new();
    let progress = ProgressLine::new("charsets", &[("documents", files.len())]);

    for path in files {
        let text = read_text(path)?;
        classify_document(&text, DocumentKind::of(path), &mut buckets)
            .map_err(|e| e.at_path(path))?;
        progress.inc("documents");
    }

    progress.finish();
    Ok(buckets)
}

/// Classify one document's text.
pub fn classify_document(
    text: &str,
    kind: DocumentKind,
    buckets: &mut CharsetBuckets,
) -> Result<(), BuildError> {
    match kind {
        DocumentKind::Stylesheet => {
            buckets.add_text(text, Region::Normal);
            buckets.add_text(text, Region::Sans);
        }
        DocumentKind::Markup => {
            let mut last = 0;
            for caps in BLOCKQUOTE.captures_iter(text) {
                let (Some(span), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                add_normal(text, last, span.start(), buckets)?;
                buckets.add_text(inner.as_str(), Region::Sans);
                last = span.end();
            }
            add_normal(text, last, text.len(), buckets)?;
        }
    }
    Ok(())
}

/// Classify `text[start..end]` as normal content.
///
/// Any blockquote opening left there has no closing tag.
fn add_normal(
    text: &str,
    start: usize,
    end: usize,
    buckets: &mut CharsetBuckets,
) -> Result<(), BuildError> {
    let segment = &text[start..end];
    if let Some(open) = BLOCKQUOTE_OPEN.find(segment) {
        let line = line_number(text, start + open.start());
        return Err(BuildError::structural_at(
            "<document>",
            line,
            "`<blockquote>` without a closing tag",
        ));
    }
    buckets.add_text(segment, Region::Normal);
    Ok(())
}

/// 1-based line of a byte offset.
fn line_number(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}
