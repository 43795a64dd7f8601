//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitebake.toml`:
//!
//! | Module     | TOML Section           | Purpose                               |
//! |------------|------------------------|---------------------------------------|
//! | `paths`    | `[paths]`              | Source, output, entry document        |
//! | `bundle`   | `[bundle]`, `[reflow]` | Asset roles, placeholder reflow       |
//! | `charsets` | `[charsets]`           | Character subset collection           |
//! | `minify`   | `[minify]`             | Minifier backend and commands         |
//! | `copy`     | `[copy]`               | Verbatim files, dirs, lone scripts    |
//! | `hooks`    | `[hooks.fonts]`        | Font subsetting command               |

mod bundle;
mod charsets;
mod copy;
mod hooks;
mod minify;
mod paths;

pub use bundle::{BundleConfig, ReflowConfig};
pub use charsets::CharsetsConfig;
pub use copy::CopyConfig;
pub use hooks::{FontsHookConfig, HooksConfig};
pub use minify::{MinifyBackend, MinifyConfig};
pub use paths::PathsConfig;
