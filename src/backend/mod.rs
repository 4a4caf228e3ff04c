//! Backend Module
//!
//! This module contains all server-side code for the Car Street site.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`render`** - SSR: template resolution, page renderers, composition
//! - **`seo`** - Sitemaps, IndexNow, structured data
//! - **`leads`** - Public form intake and admin notifications
//! - **`catalog`** - Public read-only catalog API
//! - **`admin`** - Back-office API
//! - **`auth`** - Session token verification
//! - **`middleware`** - Admin guard
//! - **`db`** - `SiteStore` and its PostgreSQL and in-process implementations
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── render/         - SSR pipeline
//! ├── seo/            - Sitemaps and IndexNow
//! ├── leads/          - Lead intake
//! ├── catalog/        - Public catalog API
//! ├── admin/          - Admin API
//! ├── auth/           - Session tokens
//! ├── middleware/     - Request middleware
//! ├── db/             - Data access
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the configuration, the store, the
//! template resolver and renderer, the IndexNow client, the lead notifier
//! and the optional session verifier. None of it is mutated after startup
//! apart from the production template cache.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Server-side rendering
pub mod render;

/// Sitemaps, IndexNow, structured data
pub mod seo;

/// Lead intake and notification
pub mod leads;

/// Public catalog API
pub mod catalog;

/// Back-office API
pub mod admin;

/// Session token verification
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Data access
pub mod db;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
