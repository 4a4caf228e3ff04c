//! Shared Module
//!
//! Domain types shared by the rendering pipeline, the public API and the
//! admin API. These mirror the rows of the hosted database tables and the
//! JSON payloads submitted by the site's forms.
//!
//! # Overview
//!
//! - **`vehicle`** - Vehicles, images, inventory filtering
//! - **`lead`** - Contact, sell-your-car and pre-approval submissions
//! - **`faq`** - Contact page FAQ entries
//! - **`user`** - Back-office profiles and roles
//! - **`error`** - Validation and mapping errors

/// Shared error types
pub mod error;

/// Vehicle catalog types
pub mod vehicle;

/// Lead and form types
pub mod lead;

/// FAQ entries
pub mod faq;

/// Back-office users and roles
pub mod user;

pub use error::SharedError;
pub use faq::{Faq, FaqInput};
pub use lead::{ContactForm, Lead, LeadKind, LeadStatus, LeadUpdate, NewLead, PreApprovalForm, SellRequestForm};
pub use user::{Role, UserWithRoles};
pub use vehicle::{
    InventoryFacets, InventoryFilter, NewVehicleImage, SitemapVehicle, Vehicle, VehicleCondition,
    VehicleImage, VehicleInput, VehicleStatus,
};
