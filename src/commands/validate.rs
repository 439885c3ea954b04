//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which resolves the
//! configuration files and reports every problem found without running any
//! VCS commands.
//!
//! ## Functionality
//!
//! - **Parsing**: malformed YAML/JSON, include cycles, and unreadable
//!   files abort with a fatal error.
//! - **Validation**: per-repository failures (bad URLs, path escapes,
//!   unknown VCS types) are collected exhaustively and all reported.
//! - **Duplicate detection**: keys defined more than once with differing
//!   definitions are shown as warnings; `--strict` turns them into errors.
//!
//! This command is a safe, read-only operation that does not modify any
//! files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use vcspull::output::{ColorMode, OutputConfig};
use vcspull::resolver::Resolver;

/// Validate vcspull configuration files
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Paths to configuration files to validate.
    ///
    /// May be given multiple times; later files override earlier ones on
    /// duplicate repository keys. When omitted, configs are discovered in
    /// ~/.vcspull.yaml and the platform config directory.
    /// Can also be set with the `VCSPULL_CONFIG` environment variable.
    #[arg(short, long, value_name = "FILE", env = "VCSPULL_CONFIG")]
    pub config: Vec<PathBuf>,

    /// Treat duplicate-definition warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color: ColorMode) -> Result<()> {
    let out = OutputConfig::from_mode(color);
    let paths = super::config_paths(&args.config)?;

    for path in &paths {
        println!(
            "{} Validating configuration: {}",
            out.emoji("🔍", "[SCAN]"),
            path.display()
        );
    }

    let resolution = Resolver::new().resolve(&paths)?;

    for conflict in &resolution.conflicts {
        println!(
            "{} Duplicate definition of {} (kept the one from {})",
            out.emoji("⚠️", "[WARN]"),
            conflict.location(),
            conflict
                .kept_source
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the later document".to_string())
        );
    }

    for error in &resolution.errors {
        println!("{} {}", out.emoji("❌", "[ERR]"), error);
    }

    if !resolution.errors.is_empty() {
        println!(
            "\n{} {} validation errors ({} repositories valid)",
            out.emoji("❌", "[ERR]"),
            resolution.errors.len(),
            resolution.repositories.len()
        );
        anyhow::bail!("Configuration validation failed");
    }

    if args.strict && !resolution.conflicts.is_empty() {
        println!(
            "\n{} Configuration has duplicate definitions (strict mode enabled)",
            out.emoji("❌", "[ERR]")
        );
        anyhow::bail!("Configuration validation failed in strict mode");
    }

    println!(
        "\n{} Configuration is valid ({} repositories)",
        out.emoji("✅", "[OK]"),
        resolution.repositories.len()
    );
    Ok(())
}
