//! # Configuration Format Loader
//!
//! Reads a configuration file from disk and parses it into a
//! [`RawConfigDocument`]. The format is detected by extension: `.yaml` and
//! `.yml` parse with `serde_yaml`, `.json` parses with `serde_json` (and is
//! then carried as a YAML value so the raw model layer sees one shape).
//!
//! Syntax failures surface the file path and, when the underlying parser
//! provides it, line/column context. The loader does not validate semantic
//! content: a syntactically valid but empty document loads as an empty
//! `RawConfigDocument`.
//!
//! File reads go through the injected [`FileSystem`] so tests can load from
//! memory.

use crate::config::{self, RawConfigDocument};
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use serde_yaml::Value;
use std::path::Path;

/// Supported on-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads configuration files through an injected filesystem.
pub struct Loader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> Loader<'a> {
    /// Create a loader over the given filesystem.
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// The filesystem this loader reads from.
    pub fn fs(&self) -> &'a dyn FileSystem {
        self.fs
    }

    /// Load and parse one configuration file.
    pub fn load(&self, path: &Path) -> Result<RawConfigDocument> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| Error::ConfigParse {
            file: path.display().to_string(),
            message: "unrecognized configuration format".to_string(),
            hint: Some("use a .yaml, .yml, or .json extension".to_string()),
        })?;

        let content = self.fs.read_to_string(path)?;
        let value = parse_str(&content, format, path)?;
        config::to_raw(value, Some(path.to_path_buf()))
    }
}

/// Parse configuration text into a generic YAML value.
///
/// `path` is used only for error attribution.
pub fn parse_str(content: &str, format: ConfigFormat, path: &Path) -> Result<Value> {
    match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| yaml_parse_error(path, &e))
        }
        ConfigFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| json_parse_error(path, &e))?;
            serde_yaml::to_value(value).map_err(Error::Yaml)
        }
    }
}

fn yaml_parse_error(path: &Path, error: &serde_yaml::Error) -> Error {
    let message = match error.location() {
        Some(location) => format!(
            "YAML syntax error at line {}, column {}: {}",
            location.line(),
            location.column(),
            error
        ),
        None => format!("YAML syntax error: {}", error),
    };
    Error::ConfigParse {
        file: path.display().to_string(),
        message,
        hint: None,
    }
}

fn json_parse_error(path: &Path, error: &serde_json::Error) -> Error {
    Error::ConfigParse {
        file: path.display().to_string(),
        message: format!(
            "JSON syntax error at line {}, column {}: {}",
            error.line(),
            error.column(),
            error
        ),
        hint: None,
    }
}
