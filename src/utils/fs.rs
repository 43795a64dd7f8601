//! Filesystem helpers.
//!
//! Every failure is reported as [`BuildError::Io`] carrying the offending path,
//! so a build aborts with a message naming the file it could not touch.

use crate::error::BuildError;
use std::fs;
use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|e| BuildError::io(path, e))
}

/// Write a file, creating missing parent directories.
pub fn write_text(path: &Path, content: impl AsRef<[u8]>) -> Result<(), BuildError> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|e| BuildError::io(path, e))
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<(), BuildError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Remove `dir` (if present) and recreate it empty.
pub fn reset_dir(dir: &Path) -> Result<(), BuildError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))
}

/// Copy a single file, creating missing parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), BuildError> {
    ensure_parent(dst)?;
    fs::copy(src, dst)
        .map(|_| ())
        .map_err(|e| BuildError::io(src, e))
}

/// Mirror the directory tree under `src` into `dst`.
///
/// Returns the number of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    if !src.is_dir() {
        return Err(BuildError::io(
            src,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut copied = 0;
    for entry in jwalk::WalkDir::new(src).sort(true) {
        let entry = entry.map_err(|e| BuildError::io(src, std::io::Error::other(e.to_string())))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(src) else {
            continue;
        };
        copy_file(&path, &dst.join(relative))?;
        copied += 1;
    }
    Ok(copied)
}

/// List the entries directly inside `dir`, sorted by name.
///
/// Every entry must be a file; a nested directory is an error.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let entries = fs::read_dir(dir).map_err(|e| BuildError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| BuildError::io(dir, e))?.path();
        if path.is_dir() {
            return Err(BuildError::io(
                &path,
                std::io::Error::new(
                    std::io::ErrorKind::IsADirectory,
                    "nested directories are not scanned",
                ),
            ));
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_write_text_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.txt");
        write_text(&path, "hello").unwrap();
        assert_eq!(read_text(&path).unwrap(), "hello");
    }

    #[test]
    fn test_read_text_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_text(&dir.path().join("missing.html")).unwrap_err();
        assert!(matches!(err, BuildError::Io(..)));
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn test_copy_dir_recursive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join("nested/b.txt"), "b").unwrap();

        let dst = dir.path().join("dst");
        let copied = copy_dir(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("nested/b.txt")).unwrap(), "b");
    }

    #[test]
    fn test_copy_dir_missing_source() {
        let dir = TempDir::new().unwrap();
        assert!(copy_dir(&dir.path().join("nope"), &dir.path().join("dst")).is_err());
    }

    #[test]
    fn test_list_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.html"), "").unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();

        let files = list_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.html", "b.html"]);
    }

    #[test]
    fn test_list_files_rejects_nested_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let err = list_files(dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::Io(..)));
        assert!(err.to_string().contains("sub"));
    }

    #[test]
    fn test_reset_dir_clears_contents() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("output");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.txt"), "x").unwrap();

        reset_dir(&out).unwrap();
        assert!(out.is_dir());
        assert!(!out.join("stale.txt").exists());
    }
}
