//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs           - Module exports and documentation
//! ├── router.rs        - Main router creation, static assets, SSR fallback
//! ├── api_routes.rs    - Public form and catalog endpoints
//! ├── seo_routes.rs    - Sitemaps and the IndexNow key file
//! └── admin_routes.rs  - Back-office API behind require_admin
//! ```

/// Main router creation
pub mod router;

/// Public API endpoints
pub mod api_routes;

/// Sitemap and IndexNow routes
pub mod seo_routes;

/// Admin API endpoints
pub mod admin_routes;

pub use router::create_router;
