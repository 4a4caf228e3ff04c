//! Shared Error Types
//!
//! This module defines error types shared by the catalog, lead and admin
//! layers. They describe failures in the data itself (a form field that
//! does not validate, a status string the database returned that we do not
//! recognise) rather than failures of the server.
//!
//! # Error Categories
//!
//! - `ValidationError` - A submitted field failed validation
//! - `InvalidValue` - A stored value could not be mapped onto a domain type
//! - `SerializationError` - JSON serialization/deserialization failures
//!
//! # Usage
//!
//! ```rust
//! use carstreet::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email address");
//! assert!(error.to_string().contains("email"));
//! ```
use thiserror::Error;

/// Shared error types used across the domain layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Submitted data failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A value read from storage is not one of the known variants
    #[error("Invalid {kind} value: '{value}'")]
    InvalidValue {
        /// What kind of value was expected (e.g. "vehicle status")
        kind: &'static str,
        /// The offending value
        value: String,
    },

    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
