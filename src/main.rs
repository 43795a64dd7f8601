//! Sitebake - an asset pipeline for a hand-written static site.

mod bundle;
mod charset;
mod cli;
mod config;
mod error;
mod hooks;
mod logger;
mod minify;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Commands::Init { force } = &cli.command {
        return cli::init::write_config(&cli.config, *force);
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config),
        Commands::Charsets { .. } => cli::build::build_charsets(&config),
        Commands::Init { .. } => Ok(()),
    }
}
