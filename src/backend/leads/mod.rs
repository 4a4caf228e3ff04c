//! Leads Module
//!
//! Public form submissions and the admin notifications they trigger.
//!
//! # Module Structure
//!
//! ```text
//! leads/
//! ├── mod.rs       - Module exports
//! ├── notify.rs    - LeadNotifier trait, SMTP and logging notifiers, email bodies
//! └── handlers.rs  - POST handlers for the three public forms
//! ```

/// Admin email notifications
pub mod notify;

/// Form submission handlers
pub mod handlers;

pub use notify::{LeadEmail, LeadNotifier, LogNotifier, NotifyError, SmtpNotifier};
