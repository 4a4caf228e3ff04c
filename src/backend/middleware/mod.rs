//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Admin authentication for the back-office API
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use carstreet::backend::middleware::require_admin;
//!
//! let admin = admin_routes().route_layer(from_fn_with_state(state.clone(), require_admin));
//! ```

pub mod auth;

pub use auth::{require_admin, AdminUser, AuthenticatedAdmin};
