//! Dotted keys into `sitebake.toml`.

use owo_colors::OwoColorize;
use std::fmt;

/// A key such as `hooks.fonts.command`, generated by `#[derive(Config)]`
/// as `FontsHookConfig::FIELDS.command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    /// Table header holding the key: `hooks.fonts` for `hooks.fonts.command`.
    pub fn section(&self) -> &'static str {
        self.0.rsplit_once('.').map_or("", |(section, _)| section)
    }

    /// The key inside its table.
    pub fn key(&self) -> &'static str {
        self.0.rsplit_once('.').map_or(self.0, |(_, key)| key)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0.yellow())
    }
}
