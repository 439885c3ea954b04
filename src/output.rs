//! # Output Configuration
//!
//! Controls CLI output appearance. Color and emoji use is decided once,
//! from the `--color` flag and the conventional environment variables
//! (`NO_COLOR` per https://no-color.org/, `CLICOLOR`, `CLICOLOR_FORCE`,
//! `TERM=dumb`), then threaded through the command implementations.

use clap::ValueEnum;
use std::env;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Detect from the terminal and environment.
    #[default]
    Auto,
    /// Force colors on, overriding NO_COLOR.
    Always,
    /// Force colors off.
    Never,
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the flag against the environment.
    ///
    /// In [`ColorMode::Auto`], colors are disabled when `NO_COLOR` is set
    /// (any value, even empty), when `CLICOLOR=0`, when `TERM=dumb`, or
    /// when stdout is not a terminal. `CLICOLOR_FORCE` set to a non-zero
    /// value forces colors on regardless of the TTY check.
    pub fn from_mode(mode: ColorMode) -> Self {
        let use_color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => detect_color_support(),
        };

        Self { use_color }
    }

    /// Pick the emoji or its plain-text stand-in.
    pub fn emoji<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_mode(ColorMode::Auto)
    }
}

fn detect_color_support() -> bool {
    // NO_COLOR disables by its mere presence.
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }

    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }

    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }

    console::Term::stdout().features().colors_supported()
}
