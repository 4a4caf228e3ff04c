/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - Resolved configuration
 * - The data store (PostgreSQL or in-process)
 * - The template resolver and page renderer used by SSR
 * - The IndexNow client and lead notifier
 * - The session verifier for the admin API, when a JWT secret is set
 *
 * # Thread Safety
 *
 * Nothing in the state is mutated after startup except the template
 * cache, which is written at most once. Every field is `Arc`-shared or
 * cheap to clone.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::SessionVerifier;
use crate::backend::db::SiteStore;
use crate::backend::leads::LeadNotifier;
use crate::backend::render::{PageRenderer, TemplateResolver};
use crate::backend::seo::IndexNowClient;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,

    /// Catalog, lead, FAQ and role storage
    pub store: Arc<dyn SiteStore>,

    /// HTML shell loader; caches in production
    pub templates: Arc<TemplateResolver>,

    pub renderer: Arc<dyn PageRenderer>,

    pub indexnow: IndexNowClient,

    pub notifier: Arc<dyn LeadNotifier>,

    /// `None` when `SUPABASE_JWT_SECRET` is unset; the admin API then rejects every request
    pub sessions: Option<SessionVerifier>,
}

impl FromRef<AppState> for Arc<dyn SiteStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
