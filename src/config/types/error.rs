//! Config loading errors and validation diagnostics.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file `{}` not found, run `sitebake init` to create one", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML")]
    Toml(#[from] toml::de::Error),

    // No #[from]: source() would print the diagnostics twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// What a configured path has to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Dir,
}

impl PathKind {
    fn exists(self, path: &Path) -> bool {
        match self {
            Self::File => path.is_file(),
            Self::Dir => path.is_dir(),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "directory",
        }
    }
}

/// One rejected key.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

/// Validation errors, reported together grouped by TOML table.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors.push(ConfigDiagnostic {
            field,
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    /// Printed right away; never fails validation.
    pub fn hint(&self, field: FieldPath, message: impl Into<String>) {
        crate::log!("hint"; "{field}: {}", message.into());
    }

    /// Record an error unless `path` exists as `kind`. Returns whether it does.
    pub fn require(&mut self, field: FieldPath, path: &Path, kind: PathKind) -> bool {
        let exists = kind.exists(path);
        if !exists {
            self.error(field, format!("{} not found: {}", kind.noun(), path.display()));
        }
        exists
    }

    /// Like [`require`](Self::require) for an `entry` of the source tree,
    /// which must be written relative to it.
    pub fn require_in(
        &mut self,
        field: FieldPath,
        source: &Path,
        entry: &Path,
        kind: PathKind,
    ) -> bool {
        if entry.is_absolute() {
            self.error(
                field,
                format!("must be relative to the source tree: {}", entry.display()),
            );
            return false;
        }
        self.require(field, &source.join(entry), kind)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Tables in the order their first error was recorded.
    fn sections(&self) -> Vec<&'static str> {
        let mut sections: Vec<&'static str> = Vec::new();
        for err in &self.errors {
            let section = err.field.section();
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        sections
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "config validation failed:".red().bold())?;
        for section in self.sections() {
            write!(f, "\n\n{}", format_args!("[{section}]").cyan())?;
            for err in self.errors.iter().filter(|e| e.field.section() == section) {
                write!(f, "\n  {} {} {}", err.field.key().bold(), "→".red(), err.message)?;
                if let Some(hint) = &err.hint {
                    write!(f, "\n    {} {hint}", "hint:".yellow())?;
                }
            }
        }
        if self.len() > 1 {
            write!(f, "\n\n{} {}", self.len().to_string().red().bold(), "errors".dimmed())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
