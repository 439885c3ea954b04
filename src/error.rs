//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `vcspull` configuration resolution pipeline. It uses the `thiserror`
//! library to create a comprehensive `Error` enum that covers all fatal
//! failure modes, providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum for fatal errors. Syntax errors
//!   (`ConfigParse`) and structural errors (`Configuration`,
//!   `CircularInclude`) abort a resolution run; they indicate input that
//!   cannot be meaningfully interpreted.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! Per-record data problems (bad URL, unsafe path, unknown VCS type, and so
//! on) are deliberately *not* represented here. Those are collected into
//! [`crate::validator::ValidationError`] reports so that one bad record
//! never hides the problems in its siblings.

use thiserror::Error;

/// Main error type for configuration resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration file could not be parsed.
    ///
    /// Carries the offending file, the underlying cause (with line/column
    /// context when the parser provides it), and optionally a hint about
    /// how to fix it.
    #[error("Configuration parsing error in {file}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        file: String,
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A structural problem with the configuration as a whole, such as a
    /// missing include target or a top-level value that is not a mapping.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        message: String,
        /// Optional hint for how to resolve the issue
        hint: Option<String>,
    },

    /// A circular chain of `include` directives was detected.
    #[error("Circular include detected: {cycle}")]
    CircularInclude { cycle: String },

    /// An acyclic but excessively deep include chain exceeded the
    /// configured limit.
    #[error("Include depth limit ({limit}) exceeded while loading {file}")]
    IncludeDepthExceeded { limit: usize, file: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            file: "repos.yaml".to_string(),
            message: "YAML syntax error at line 3, column 5".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("repos.yaml"));
        assert!(display.contains("line 3, column 5"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            file: "repos.json".to_string(),
            message: "unrecognized configuration format".to_string(),
            hint: Some("use a .yaml, .yml, or .json extension".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("hint:"));
        assert!(display.contains(".yaml, .yml, or .json"));
    }

    #[test]
    fn test_error_display_configuration() {
        let error = Error::Configuration {
            message: "include target not found: ./missing.yaml".to_string(),
            hint: Some("mark the include optional to skip missing files".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration error"));
        assert!(display.contains("./missing.yaml"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_error_display_circular_include() {
        let error = Error::CircularInclude {
            cycle: "a.yaml -> b.yaml -> a.yaml".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Circular include detected"));
        assert!(display.contains("a.yaml -> b.yaml -> a.yaml"));
    }

    #[test]
    fn test_error_display_include_depth_exceeded() {
        let error = Error::IncludeDepthExceeded {
            limit: 32,
            file: "deep.yaml".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Include depth limit (32)"));
        assert!(display.contains("deep.yaml"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_str = "invalid: [unclosed";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        let display = format!("{}", error);
        assert!(display.contains("JSON parsing error"));
    }
}
