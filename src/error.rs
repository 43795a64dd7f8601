//! Build error types.
//!
//! Every failure is fatal: the bundle and the charsets are only valid when the
//! whole reference set and the whole corpus were processed.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the bundle, reflow and charset stages.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The corpus violates a hard-coded structural assumption.
    #[error("structural mismatch in `{}`{}: {message}", .path.display(), LineSuffix(.line))]
    Structural {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    #[error("IO error on `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}

impl BuildError {
    /// Structural mismatch on a specific (1-based) line.
    pub fn structural_at(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Structural {
            path: path.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    /// Structural mismatch that concerns the document as a whole.
    pub fn structural(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Structural {
            path: path.into(),
            line: None,
            message: message.into(),
        }
    }

    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Io(path.to_path_buf(), err)
    }

    /// Replace the placeholder path of an error raised by a pure transform.
    ///
    /// Text transforms don't know where their input came from; the caller
    /// attaches the real path once the error surfaces.
    pub fn at_path(self, path: &Path) -> Self {
        match self {
            Self::Structural { line, message, .. } => Self::Structural {
                path: path.to_path_buf(),
                line,
                message,
            },
            io => io,
        }
    }
}

struct LineSuffix<'a>(&'a Option<usize>);

impl fmt::Display for LineSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(line) => write!(f, ":{line}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_structural_display_with_line() {
        let err = BuildError::structural_at("index.html", 12, "unrecognized stylesheet `a.css`");
        let display = err.to_string();
        assert_eq!(
            display,
            "structural mismatch in `index.html`:12: unrecognized stylesheet `a.css`"
        );
    }

    #[test]
    fn test_structural_display_without_line() {
        let err = BuildError::structural("pages.css", "no `:root` block");
        assert_eq!(
            err.to_string(),
            "structural mismatch in `pages.css`: no `:root` block"
        );
    }

    #[test]
    fn test_io_display() {
        let err = BuildError::io(
            Path::new("missing.js"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("missing.js"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_at_path_rewrites_structural_only() {
        let err = BuildError::structural("<css>", "no block").at_path(Path::new("out/pages.css"));
        assert!(err.to_string().contains("out/pages.css"));

        let io = BuildError::io(Path::new("a"), Error::other("x")).at_path(Path::new("b"));
        assert!(io.to_string().contains("`a`"));
    }
}
