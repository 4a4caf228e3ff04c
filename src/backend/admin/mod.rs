//! Admin Module
//!
//! Back-office API mounted under `/api/admin`. Every route here sits behind
//! [`require_admin`](crate::backend::middleware::require_admin); handlers
//! that record who made a change take the [`AdminUser`](crate::backend::middleware::AdminUser)
//! extractor.
//!
//! # Module Structure
//!
//! ```text
//! admin/
//! ├── mod.rs        - Module exports
//! ├── dashboard.rs  - Inventory and lead counts
//! ├── vehicles.rs   - Vehicle CRUD, primary image, image order
//! ├── leads.rs      - Lead listings and status/notes updates
//! ├── users.rs      - Profiles and role grants
//! └── faqs.rs       - FAQ CRUD
//! ```

pub mod dashboard;
pub mod vehicles;
pub mod leads;
pub mod users;
pub mod faqs;
