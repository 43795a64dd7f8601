//! Bucket accumulation and output.

use super::class::{ALWAYS_CJK, Bucket, CharClass, Region, classify};
use crate::error::BuildError;
use crate::utils::fs::write_text;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// The six character sets collected over one run.
#[derive(Debug, Clone)]
pub struct CharsetBuckets {
    sets: [FxHashSet<char>; 6],
}

impl Default for CharsetBuckets {
    fn default() -> Self {
        Self::new()
    }
}

impl CharsetBuckets {
    /// Empty buckets, except for the marks the CJK face always needs.
    pub fn new() -> Self {
        let mut buckets = Self {
            sets: Default::default(),
        };
        let cjk = Bucket::new(Region::Normal, CharClass::Cjk);
        buckets.sets[cjk.index()].extend(ALWAYS_CJK);
        buckets
    }

    /// Classify every character of `text` into `region`.
    pub fn add_text(&mut self, text: &str, region: Region) {
        for c in text.chars() {
            self.add_char(c, region);
        }
    }

    #[inline]
    pub fn add_char(&mut self, c: char, region: Region) {
        let bucket = Bucket::new(region, classify(c));
        self.sets[bucket.index()].insert(c);
    }

    #[cfg(test)]
    pub fn contains(&self, bucket: Bucket, c: char) -> bool {
        self.sets[bucket.index()].contains(&c)
    }

    pub fn len(&self, bucket: Bucket) -> usize {
        self.sets[bucket.index()].len()
    }

    /// Sorted, deduplicated contents of every bucket.
    pub fn finalize(self) -> Vec<(Bucket, String)> {
        Bucket::ALL
            .into_iter()
            .zip(self.sets)
            .map(|(bucket, set)| {
                let mut chars: Vec<char> = set.into_iter().collect();
                chars.sort_unstable();
                (bucket, chars.into_iter().collect())
            })
            .collect()
    }

    /// Write `<dir>/<bucket>.txt` for each bucket, returning the written paths.
    pub fn write(self, dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
        let mut written = Vec::with_capacity(Bucket::ALL.len());
        for (bucket, content) in self.finalize() {
            let path = dir.join(format!("{}.txt", bucket.name()));
            write_text(&path, content)?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const NORMAL_CJK: Bucket = Bucket::new(Region::Normal, CharClass::Cjk);
    const SANS_CJK: Bucket = Bucket::new(Region::Sans, CharClass::Cjk);

    #[test]
    fn test_always_cjk_present() {
        let buckets = CharsetBuckets::new();
        assert!(buckets.contains(NORMAL_CJK, '、'));
        assert!(buckets.contains(NORMAL_CJK, '。'));
        assert!(!buckets.contains(SANS_CJK, '、'));
    }

    #[test]
    fn test_regions_are_independent() {
        let mut buckets = CharsetBuckets::new();
        buckets.add_text("字a", Region::Sans);
        assert!(buckets.contains(SANS_CJK, '字'));
        assert!(!buckets.contains(NORMAL_CJK, '字'));
        assert!(buckets.contains(Bucket::new(Region::Sans, CharClass::Latin), 'a'));
    }

    #[test]
    fn test_finalize_sorted_unique() {
        let mut buckets = CharsetBuckets::new();
        buckets.add_text("cabbac！，！", Region::Normal);

        let finalized = buckets.finalize();
        assert_eq!(finalized.len(), 6);
        assert_eq!(finalized[0], (Bucket::ALL[0], "abc".to_string()));
        assert_eq!(finalized[1].1, "、。");
        assert_eq!(finalized[2].1, "！，");
        assert!(finalized[3..].iter().all(|(_, s)| s.is_empty()));
    }

    #[test]
    fn test_write_bucket_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("charsets");

        let mut buckets = CharsetBuckets::new();
        buckets.add_text("zy", Region::Normal);
        let written = buckets.write(&out).unwrap();

        assert_eq!(written.len(), 6);
        assert_eq!(fs::read_to_string(out.join("latin.txt")).unwrap(), "yz");
        assert_eq!(fs::read_to_string(out.join("cjk.txt")).unwrap(), "、。");
        assert_eq!(fs::read_to_string(out.join("cjk-punct-sans.txt")).unwrap(), "");
    }
}
