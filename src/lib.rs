//! Car Street - Dealership Site Server
//!
//! Server for the Car Street used-car dealership website. It renders every
//! public page on the server, splices the result into the front-end's HTML
//! shell, and exposes the JSON APIs behind the site's forms and back office.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types
//!   - Vehicles, images and the inventory filter
//!   - Leads and the three public forms
//!   - FAQs, back-office roles
//!   - Validation errors
//!
//! - **`backend`** - The Axum server
//!   - SSR pipeline (template resolution, page rendering, composition)
//!   - Sitemaps and IndexNow
//!   - Lead intake with email notification
//!   - Admin and public catalog APIs
//!   - PostgreSQL and in-process stores
//!
//! # Usage
//!
//! ```rust,no_run
//! use carstreet::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for invalid submitted or stored data
//! - `backend::error::BackendError` for API responses
//! - SSR failures answer plain text, see `backend::render::handler`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
