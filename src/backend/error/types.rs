/**
 * Backend Error Types
 *
 * This module defines the error type returned by every API handler.
 * Each variant maps to an HTTP status code and a client-facing message.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised directly by handlers with an explicit status:
 * - Missing or invalid bearer token (401)
 * - Missing admin role (403)
 * - Unknown record id (404)
 *
 * ## Validation Errors
 *
 * Form and payload validation failures from the shared module (400).
 *
 * ## Store Errors
 *
 * Failures of the data store. The driver's message is logged but never
 * sent to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::db::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Validation or mapping error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Data store failure
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError { status, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - `StoreError` - 500 for database failures, 503 when unavailable
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } | SharedError::InvalidValue { .. } => {
                    StatusCode::BAD_REQUEST
                }
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::StoreError(err) => match err {
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
                StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::StoreError(StoreError::Database(_)) => "Database error".to_string(),
            Self::StoreError(StoreError::Unavailable(_)) => "Service temporarily unavailable".to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}
