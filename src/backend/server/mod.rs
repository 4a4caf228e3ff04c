//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`config`** - Environment variables parsed into `ServerConfig`
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`init`** - Service wiring and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - ServerConfig, RunMode, ConfigError
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - create_app and AppState::new
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env` in the binary
//! 2. **Store Selection**: PostgreSQL when `DATABASE_URL` is set
//! 3. **State Creation**: renderer, template resolver, IndexNow, notifier
//! 4. **Router Creation**: API, admin, SEO and SSR routes

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use config::{ConfigError, RunMode, ServerConfig};
pub use init::{create_app, InitError};
pub use state::AppState;
