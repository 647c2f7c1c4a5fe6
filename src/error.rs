//! Error types for ddms-rs
//!
//! This module defines all error types used throughout the library.
//! Fatal findings are returned as [`Error`]; non-fatal findings are
//! collected as [`ValidationWarning`](crate::validators::ValidationWarning)s
//! on the constructed component instead.

use std::fmt;
use thiserror::Error;

/// Result type alias using the ddms Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ddms operations
#[derive(Error, Debug)]
pub enum Error {
    /// A component failed validation and was not constructed
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The requested DDMS version is not supported
    #[error("{0}")]
    UnsupportedVersion(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Category of a fatal validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong element name or namespace, malformed attribute set
    Structural,
    /// Missing required child or too many of a bounded child
    Cardinality,
    /// Construct used outside its supported version range
    VersionGating,
    /// Mutually exclusive content models used together
    ContentModel,
    /// A required value is missing or a value is not in its lexical space
    Value,
}

impl ErrorKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::Cardinality => "cardinality",
            ErrorKind::VersionGating => "version",
            ErrorKind::ContentModel => "content-model",
            ErrorKind::Value => "value",
        }
    }
}

/// Fatal validation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Category of the violated invariant
    pub kind: ErrorKind,
    /// Locator of the element that failed validation
    pub locator: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            locator: None,
        }
    }

    /// Set the locator where validation failed
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Shorthand for building a fatal validation result
pub(crate) fn invalid<T>(kind: ErrorKind, message: impl Into<String>) -> Result<T> {
    Err(Error::Validation(ValidationError::new(kind, message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorKind::Value, "qualifier attribute is required.")
            .with_locator("/ddms:identifier");

        assert_eq!(format!("{}", err), "qualifier attribute is required.");
        assert_eq!(err.locator.as_deref(), Some("/ddms:identifier"));
        assert_eq!(err.kind.as_str(), "value");
    }

    #[test]
    fn test_error_conversion() {
        let val_err = ValidationError::new(ErrorKind::Cardinality, "test");
        let err: Error = val_err.into();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.as_validation().map(|e| e.kind), Some(ErrorKind::Cardinality));
        assert_eq!(err.to_string(), "test");
    }

    #[test]
    fn test_invalid_helper() {
        let result: Result<()> = invalid(ErrorKind::Structural, "bad");
        assert!(result.is_err());
    }
}
