//! # Error Types
//!
//! Structured error types for gad_core. Geometry and document emission never
//! fail; these errors only surface from the I/O edges (reading parameter files,
//! writing artifacts, decoding design data).
//!
//! ## Example
//!
//! ```rust
//! use gad_core::errors::{GadError, GadResult};
//!
//! fn require_output_dir(dir: &str) -> GadResult<()> {
//!     if dir.is_empty() {
//!         return Err(GadError::invalid_input("out", dir, "Output directory must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_output_dir("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gad_core operations
pub type GadResult<T> = Result<T, GadError>;

/// Structured error type for ingestion and artifact operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GadError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A parameter source could not be parsed
    #[error("Parse error in '{source_name}' at line {line}: {reason}")]
    ParseError {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl GadError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GadError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ParseError
    pub fn parse_error(source_name: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        GadError::ParseError {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GadError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        GadError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GadError::InvalidInput { .. } => "INVALID_INPUT",
            GadError::ParseError { .. } => "PARSE_ERROR",
            GadError::FileError { .. } => "FILE_ERROR",
            GadError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for GadError {
    fn from(e: serde_json::Error) -> Self {
        GadError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = GadError::parse_error("bridge.csv", 3, "unterminated quote");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: GadError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(GadError::file_error("open", "x.txt", "missing").error_code(), "FILE_ERROR");
        assert_eq!(GadError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_display_includes_context() {
        let error = GadError::parse_error("params.txt", 7, "empty key");
        assert_eq!(error.to_string(), "Parse error in 'params.txt' at line 7: empty key");
    }
}
