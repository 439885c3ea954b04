//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `vcspull` command-line tool. Each subcommand is defined in its own file
//! to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! The `execute` function is the main entry point for the command and is
//! responsible for orchestrating the necessary operations, calling into the
//! `vcspull` library to perform the core logic.

pub mod ls;
pub mod validate;

use anyhow::Result;
use std::path::PathBuf;
use vcspull::defaults;
use vcspull::environment::SystemEnvironment;
use vcspull::filesystem::{FileSystem, OsFileSystem};
use vcspull::suggestions;

/// Resolve the config paths a command operates on.
///
/// Explicit `-c/--config` paths win and must exist; otherwise fall back to
/// discovery in the conventional locations.
pub fn config_paths(explicit: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
        let fs = OsFileSystem;
        for path in explicit {
            if !fs.exists(path) {
                return Err(suggestions::config_not_found(path));
            }
        }
        return Ok(explicit.to_vec());
    }

    let found = defaults::find_configs(&OsFileSystem, &SystemEnvironment);
    if found.is_empty() {
        return Err(suggestions::no_config_found());
    }
    Ok(found)
}
