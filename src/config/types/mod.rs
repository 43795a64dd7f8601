//! Configuration utility types.
//!
//! | Module  | Purpose                                            |
//! |---------|----------------------------------------------------|
//! | `error` | Load errors and validation diagnostics per table   |
//! | `field` | Dotted keys used to place diagnostics              |

mod error;
mod field;

pub use error::{ConfigDiagnostics, ConfigError, PathKind};
pub use field::FieldPath;
