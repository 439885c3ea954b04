//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which resolves the
//! configuration and prints the repositories it describes. Useful for
//! checking what a sync run would operate on.
//!
//! Output is one line per repository by default, or a JSON array with
//! `--json` for scripting.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use vcspull::output::{ColorMode, OutputConfig};
use vcspull::resolver::Resolver;

/// List the repositories a configuration resolves to
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Paths to configuration files.
    ///
    /// When omitted, configs are discovered in ~/.vcspull.yaml and the
    /// platform config directory.
    /// Can also be set with the `VCSPULL_CONFIG` environment variable.
    #[arg(short, long, value_name = "FILE", env = "VCSPULL_CONFIG")]
    pub config: Vec<PathBuf>,

    /// Emit machine-readable JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, color: ColorMode) -> Result<()> {
    let out = OutputConfig::from_mode(color);
    let paths = super::config_paths(&args.config)?;
    let resolution = Resolver::new().resolve(&paths)?;

    if !resolution.errors.is_empty() {
        for error in &resolution.errors {
            eprintln!("{} {}", out.emoji("❌", "[ERR]"), error);
        }
        anyhow::bail!(
            "{} repositories failed validation; fix them or run vcspull validate",
            resolution.errors.len()
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution.repositories)?);
        return Ok(());
    }

    for repo in &resolution.repositories {
        println!(
            "{:<4} {:<30} {}",
            repo.vcs,
            repo.name,
            repo.path.display()
        );
    }

    Ok(())
}
