//! Error handling for the templinst generator.
//!
//! This module defines the main error type `Error` used by every stage of a
//! generation pipeline, along with a convenient `Result` type alias. It uses
//! `thiserror` for the boilerplate and implements conversions from the
//! configuration parsers.
//!
//! # Examples
//!
//! ```
//! use templinst::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("no pipelines configured"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for templinst operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for templinst operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A declarations, usage or target file could not be read or written
    #[error("Failed to access {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML configuration parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A usage site passes fewer template arguments than the class requires
    #[error(
        "Template class usage cannot have fewer parameters than the template class definition \
         ({class} requires {required}, found {found}) at {location}: {line}"
    )]
    InsufficientArguments {
        class: String,
        found: usize,
        required: usize,
        location: String,
        line: String,
    },

    /// An argument contains an arithmetic operator but is not a literal expression
    #[error("Cannot fold template argument '{expression}': {reason}")]
    Expression { expression: String, reason: String },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new expression folding error
    pub fn expression<E: Into<String>, R: Into<String>>(expression: E, reason: R) -> Self {
        Self::Expression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error with the path that caused it
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_config_creation() {
        let error = Error::config("Invalid configuration");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_error_expression_creation() {
        let error = Error::expression("2+", "unexpected end of expression");
        assert!(matches!(error, Error::Expression { .. }));
        assert_eq!(
            error.to_string(),
            "Cannot fold template argument '2+': unexpected end of expression"
        );
    }

    #[test]
    fn test_insufficient_arguments_message_names_class_and_line() {
        let error = Error::InsufficientArguments {
            class: "Action".to_string(),
            found: 1,
            required: 2,
            location: "src/unit.cpp:12".to_string(),
            line: "Action<int> a;".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("Action requires 2, found 1"));
        assert!(message.contains("src/unit.cpp:12"));
        assert!(message.contains("Action<int> a;"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("I/O error"));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_file_keeps_path() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error = Error::file("include/action.hpp", io_error);
        assert!(error.to_string().contains("include/action.hpp"));
        assert!(error.to_string().contains("missing"));
    }

    #[test]
    fn test_error_from_toml_error() {
        let toml_result: std::result::Result<toml::Value, _> = toml::from_str("pipeline = [");
        let error: Error = toml_result.unwrap_err().into();
        assert!(matches!(error, Error::Toml(_)));
        assert!(error.to_string().contains("TOML parsing error"));
    }
}
