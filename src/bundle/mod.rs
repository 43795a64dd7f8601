//! Entry document bundling.
//!
//! Pure text transforms; file access goes through caller-supplied loaders.
//!
//! - [`extract`]: reference extraction, entry rewriting, script concatenation
//! - [`transform`]: debug flag and build-removal rewrites on the bundle
//! - [`reflow`]: placeholder reflow of the variable stylesheet

pub mod extract;
pub mod reflow;
pub mod transform;

pub use extract::{RoleTable, bundle_entry, source_loader};
pub use reflow::reflow_placeholders;
