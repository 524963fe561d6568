//! Error types and utilities for the recap pipeline

use thiserror::Error;

/// Result type alias for recap operations
pub type Result<T> = std::result::Result<T, RecapError>;

/// Main error type for recap operations
#[derive(Error, Debug)]
pub enum RecapError {
    /// Export file could not be located under the data root
    #[error("Export file not found under: {path}")]
    NotFound { path: String },

    /// Export file is present but structurally unreadable
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No qualifying records remain after cleaning
    #[error("No qualifying viewing records for {year}")]
    EmptyResult { year: i32 },

    /// Output snapshot could not be persisted
    #[error("Failed to write output: {path}")]
    Write {
        path: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RecapError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new not-found error naming the searched path
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new empty-result error for the requested year
    pub fn empty_result(year: i32) -> Self {
        Self::EmptyResult { year }
    }

    /// Create a new write error naming the destination path
    pub fn write(path: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            source: None,
        }
    }

    /// Create a new write error with source
    pub fn write_with_source(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Write {
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = RecapError::new("test message");
        assert!(error.to_string().contains("test message"));

        let not_found = RecapError::not_found("/data");
        assert!(not_found.to_string().contains("not found"));
        assert!(not_found.to_string().contains("/data"));

        let parse = RecapError::parse("missing column");
        assert!(parse.to_string().contains("Parse error"));
        assert!(parse.to_string().contains("missing column"));

        let empty = RecapError::empty_result(2025);
        assert!(empty.to_string().contains("2025"));

        let validation = RecapError::validation_field("invalid input", "year");
        assert!(validation.to_string().contains("Validation error"));
        assert!(validation.to_string().contains("invalid input"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let wrapped = RecapError::parse_with_source("failed to read export", io_error);

        assert!(wrapped.to_string().contains("failed to read export"));
        assert!(wrapped.source().is_some());

        let write = RecapError::write_with_source(
            "out.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        );
        assert!(write.to_string().contains("out.json"));
        assert!(write.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let recap_error: RecapError = io_error.into();

        assert!(recap_error.to_string().contains("I/O error"));
        assert!(recap_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let recap_error: RecapError = serde_error.into();

        assert!(recap_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_error() -> Result<String> {
            Err(RecapError::new("failure"))
        }

        assert!(returns_result().is_ok());
        assert!(returns_error().is_err());
    }
}
