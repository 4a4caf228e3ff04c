//! Data Access Module
//!
//! All durable state lives in the hosted PostgreSQL database. Handlers and
//! the page renderer never talk to `sqlx` directly; they go through the
//! [`SiteStore`] trait so the same code runs against the database in
//! production and against an in-process store in tests and local runs
//! without `DATABASE_URL`.
//!
//! # Module Structure
//!
//! ```text
//! db/
//! ├── mod.rs       - SiteStore trait and StoreError
//! ├── postgres.rs  - PgStore, the sqlx implementation
//! └── memory.rs    - MemoryStore, an in-process implementation
//! ```

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{
    Faq, FaqInput, Lead, LeadStatus, NewLead, NewVehicleImage, Role, SitemapVehicle, UserWithRoles,
    Vehicle, VehicleImage, VehicleInput,
};

/// PostgreSQL implementation
pub mod postgres;

/// In-process implementation
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a [`SiteStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query failed in the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store cannot serve requests at all
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the site reads from and writes to the hosted database
///
/// Lookups of a single record return `Ok(None)` when the record does not
/// exist; mutations of a single record return `Ok(None)`/`Ok(false)` in the
/// same situation so handlers can answer 404.
#[async_trait]
pub trait SiteStore: Send + Sync {
    // ---- vehicles ----

    /// Vehicles with status `available`, newest first, images attached
    async fn available_vehicles(&self) -> StoreResult<Vec<Vehicle>>;

    /// Available vehicles flagged as featured, newest first
    async fn featured_vehicles(&self) -> StoreResult<Vec<Vehicle>>;

    /// Every vehicle regardless of status, newest first
    async fn all_vehicles(&self) -> StoreResult<Vec<Vehicle>>;

    async fn vehicle(&self, id: Uuid) -> StoreResult<Option<Vehicle>>;

    /// Available vehicles ordered by `updated_at` descending
    async fn sitemap_vehicles(&self) -> StoreResult<Vec<SitemapVehicle>>;

    async fn create_vehicle(&self, input: VehicleInput) -> StoreResult<Vehicle>;

    async fn update_vehicle(&self, id: Uuid, input: VehicleInput) -> StoreResult<Option<Vehicle>>;

    async fn delete_vehicle(&self, id: Uuid) -> StoreResult<bool>;

    /// Append an image after the vehicle's existing ones
    ///
    /// A primary image takes the flag from every other image of the vehicle.
    async fn add_image(
        &self,
        vehicle_id: Uuid,
        image: NewVehicleImage,
    ) -> StoreResult<Option<VehicleImage>>;

    /// Remove an image and close the gap it leaves in `display_order`
    async fn delete_image(&self, vehicle_id: Uuid, image_id: Uuid) -> StoreResult<bool>;

    /// Make `image_id` the only primary image of `vehicle_id`
    async fn set_primary_image(&self, vehicle_id: Uuid, image_id: Uuid) -> StoreResult<bool>;

    /// Rewrite `display_order` to `0..n` following `ordered_ids`
    ///
    /// `ordered_ids` must name every image of the vehicle exactly once;
    /// anything else leaves the order untouched and returns `Ok(false)`.
    async fn reorder_images(&self, vehicle_id: Uuid, ordered_ids: &[Uuid]) -> StoreResult<bool>;

    // ---- leads ----

    async fn insert_lead(&self, lead: NewLead) -> StoreResult<Lead>;

    /// All leads, newest first
    async fn leads(&self) -> StoreResult<Vec<Lead>>;

    async fn lead(&self, id: Uuid) -> StoreResult<Option<Lead>>;

    async fn update_lead(
        &self,
        id: Uuid,
        status: LeadStatus,
        notes: Option<String>,
    ) -> StoreResult<Option<Lead>>;

    // ---- faqs ----

    /// FAQs ordered by `display_order`
    async fn faqs(&self, active_only: bool) -> StoreResult<Vec<Faq>>;

    async fn create_faq(&self, input: FaqInput) -> StoreResult<Faq>;

    async fn update_faq(&self, id: Uuid, input: FaqInput) -> StoreResult<Option<Faq>>;

    async fn delete_faq(&self, id: Uuid) -> StoreResult<bool>;

    // ---- users ----

    async fn users(&self) -> StoreResult<Vec<UserWithRoles>>;

    async fn has_role(&self, user_id: Uuid, role: Role) -> StoreResult<bool>;

    async fn grant_role(&self, user_id: Uuid, role: Role) -> StoreResult<()>;

    async fn revoke_role(&self, user_id: Uuid, role: Role) -> StoreResult<bool>;
}
