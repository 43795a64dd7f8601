//! Character subset classification for font subsetting.
//!
//! Every character used by the corpus lands in exactly one of three classes
//! (latin, CJK, CJK punctuation) per region (normal text, blockquote text).
//! The six buckets are written as `<bucket>.txt` files holding the sorted,
//! deduplicated characters with no separators.

pub mod bucket;
pub mod class;
pub mod scan;

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::log;
use std::path::PathBuf;

/// Scan the corpus configured in `[charsets]` and write the bucket files.
pub fn generate(config: &SiteConfig) -> Result<Vec<PathBuf>, BuildError> {
    let dirs: Vec<PathBuf> = config
        .charsets
        .sources
        .iter()
        .map(|dir| config.paths.source_join(dir))
        .collect();

    let files = scan::corpus_files(&config.paths.entry_path(), &dirs)?;
    let buckets = scan::scan_corpus(&files)?;

    for bucket in class::Bucket::ALL {
        crate::debug!("charsets"; "{}: {} chars", bucket, buckets.len(bucket));
    }

    let written = buckets.write(&config.charsets.output)?;
    log!(
        "charsets";
        "{} buckets from {} documents -> {}",
        written.len(),
        files.len(),
        config.root_relative(&config.charsets.output).display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_six_files() {
        let dir = TempDir::new().unwrap();
        let root = crate::utils::fs::normalize_path(dir.path());
        let source = root.join("html");
        fs::create_dir_all(source.join("pages")).unwrap();
        fs::write(source.join("index.html"), "<p>Hi，世界</p>").unwrap();
        fs::write(source.join("pages/a.html"), "<blockquote>“好”</blockquote>").unwrap();

        let mut config = test_parse_config("[charsets]\nsources = [\"pages\"]");
        config.root = root.clone();
        config.paths.source = source;
        config.charsets.output = root.join("fonts/charsets");

        let written = generate(&config).unwrap();
        assert_eq!(written.len(), 6);

        let read = |name: &str| fs::read_to_string(root.join("fonts/charsets").join(name)).unwrap();
        assert_eq!(read("cjk.txt"), "、。世界");
        assert_eq!(read("cjk-punct.txt"), "，");
        assert_eq!(read("latin-sans.txt"), "“”");
        assert_eq!(read("cjk-sans.txt"), "好");
        assert!(read("latin.txt").contains('H'));
    }
}
