//! SEO Module
//!
//! Everything that exists for search engines rather than visitors.
//!
//! # Module Structure
//!
//! ```text
//! seo/
//! ├── mod.rs              - Module exports
//! ├── sitemap.rs          - Sitemap XML builders
//! ├── indexnow.rs         - IndexNow submission client
//! ├── structured_data.rs  - schema.org JSON-LD for vehicle pages
//! └── handlers.rs         - HTTP handlers for the sitemap and IndexNow routes
//! ```

/// Sitemap XML builders
pub mod sitemap;

/// IndexNow submission client
pub mod indexnow;

/// schema.org JSON-LD
pub mod structured_data;

/// HTTP handlers
pub mod handlers;

pub use indexnow::{IndexNowClient, IndexNowError, SubmissionKind, SubmissionResult};
pub use sitemap::Sitemap;
