//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use vcspull::output::ColorMode;

use crate::commands;

/// vcspull - Declarative configuration for collections of repositories
#[derive(Parser, Debug)]
#[command(name = "vcspull")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate configuration files without running any VCS commands
    Validate(commands::validate::ValidateArgs),

    /// List the repositories a configuration resolves to
    Ls(commands::ls::LsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .init();

        match self.command {
            Commands::Validate(args) => commands::validate::execute(args, self.color),
            Commands::Ls(args) => commands::ls::execute(args, self.color),
        }
    }
}
