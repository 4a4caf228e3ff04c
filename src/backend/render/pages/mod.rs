//! Native Site Renderer
//!
//! Renders every public route in-process. Data is loaded from the store
//! before any markup is produced, so the head tags returned with a page are
//! complete the moment `render` returns.
//!
//! # Routes
//!
//! | Path                | Page                                   |
//! |---------------------|----------------------------------------|
//! | `/`                 | Home with featured vehicles            |
//! | `/inventory`        | Filterable inventory                   |
//! | `/vehicle/{id}`     | Vehicle detail with structured data    |
//! | `/about`            | About                                  |
//! | `/contact`          | Contact form and active FAQs           |
//! | `/sell-your-car`    | Sell-your-car wizard                   |
//! | `/pre-approval`     | Financing application                  |
//! | `/privacy-policy`   | Privacy policy                         |
//! | `/auth`             | Staff sign-in (noindex)                |
//! | `/admin...`         | Back-office shell (noindex)            |
//! | anything else       | Not found (noindex)                    |

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::db::SiteStore;
use crate::backend::render::renderer::{PageRenderer, RenderError, RenderedPage};
use crate::shared::InventoryFilter;

/// Page chrome and shared helpers
pub mod layout;

/// Home, inventory and vehicle detail
pub mod catalog;

/// Informational and form pages
pub mod info;

#[derive(Debug, Clone, PartialEq)]
enum Route {
    Home,
    Inventory(InventoryFilter),
    Vehicle(Option<Uuid>),
    About,
    Contact,
    SellYourCar,
    PreApproval,
    PrivacyPolicy,
    Auth,
    Admin,
    NotFound,
}

impl Route {
    fn parse(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        match path {
            "/" => Self::Home,
            "/inventory" => Self::Inventory(InventoryFilter::from_query(query)),
            "/about" => Self::About,
            "/contact" => Self::Contact,
            "/sell-your-car" => Self::SellYourCar,
            "/pre-approval" => Self::PreApproval,
            "/privacy-policy" => Self::PrivacyPolicy,
            "/auth" => Self::Auth,
            "/admin" => Self::Admin,
            _ if path.starts_with("/admin/") => Self::Admin,
            _ => match path.strip_prefix("/vehicle/") {
                Some(id) if !id.contains('/') => Self::Vehicle(Uuid::parse_str(id).ok()),
                _ => Self::NotFound,
            },
        }
    }
}

/// In-process renderer backed by a [`SiteStore`]
pub struct SiteRenderer {
    store: Arc<dyn SiteStore>,
    site_url: String,
}

impl SiteRenderer {
    pub fn new(store: Arc<dyn SiteStore>, site_url: impl Into<String>) -> Self {
        Self { store, site_url: site_url.into() }
    }
}

#[async_trait]
impl PageRenderer for SiteRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        let site = self.site_url.as_str();
        let page = match Route::parse(url) {
            Route::Home => catalog::home(site, &self.store.featured_vehicles().await?),
            Route::Inventory(filter) => {
                catalog::inventory(site, self.store.available_vehicles().await?, &filter)
            }
            Route::Vehicle(Some(id)) => match self.store.vehicle(id).await? {
                Some(vehicle) => catalog::vehicle_detail(site, &vehicle),
                None => catalog::vehicle_not_found(),
            },
            Route::Vehicle(None) => catalog::vehicle_not_found(),
            Route::About => info::about(site),
            Route::Contact => info::contact(site, &self.store.faqs(true).await?),
            Route::SellYourCar => info::sell_your_car(site),
            Route::PreApproval => info::pre_approval(site),
            Route::PrivacyPolicy => info::privacy_policy(site),
            Route::Auth => info::auth(),
            Route::Admin => info::admin_shell(),
            Route::NotFound => info::not_found(),
        };
        Ok(page)
    }
}
