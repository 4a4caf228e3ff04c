//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Errors raised by handlers with an explicit status
//! - `SharedError` - Validation errors from the shared module
//! - `StoreError` - Data store failures
//! - `SerializationError` - JSON serialization errors
//!
//! The SSR pipeline does not use this type: it answers with plain text, see
//! `render::handler`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

pub type ApiResult<T> = Result<T, BackendError>;
