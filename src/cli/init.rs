//! `sitebake init`: write a commented default configuration file.

use crate::config::{
    BundleConfig, CharsetsConfig, CopyConfig, FontsHookConfig, MinifyConfig, PathsConfig,
    ReflowConfig,
};
use crate::log;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Generate sitebake.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = format!(
        "# Sitebake configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    );

    let sections = [
        PathsConfig::template_with_header(),
        BundleConfig::template_with_header(),
        ReflowConfig::template_with_header(),
        CharsetsConfig::template_with_header(),
        MinifyConfig::template_with_header(),
        CopyConfig::template_with_header(),
        FontsHookConfig::template_with_header(),
    ];
    out.push_str(&sections.join("\n"));
    out
}

/// Write the default config to `path`.
///
/// An existing file is only replaced with `force`.
pub fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "`{}` already exists, pass --force to overwrite it",
            path.display()
        );
    }

    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}
