//! Authentication Module
//!
//! Staff accounts and sessions live in the hosted auth service. This server
//! verifies the session JWT sent with back-office API calls and checks the
//! caller's role in `user_roles`.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! └── sessions.rs  - JWT verification
//! ```
//!
//! Role enforcement itself lives in `middleware::auth`.

/// JWT token verification
pub mod sessions;

pub use sessions::{create_token, Claims, SessionVerifier};
