/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, renderer selection and route configuration.
 *
 * # Initialization Process
 *
 * The server initialization follows these steps:
 * 1. Connect the data store (PostgreSQL, or the in-process store when
 *    `DATABASE_URL` is unset)
 * 2. Pick the page renderer for the run mode
 * 3. Build the IndexNow client, lead notifier and session verifier
 * 4. Create and configure the router
 *
 * # Degraded Startup
 *
 * Optional services degrade instead of stopping the server: no database
 * URL means the in-process store, a bad SMTP URL means notifications are
 * only logged, and no JWT secret means the admin API answers 401. A
 * database URL that cannot be reached is an error.
 */

use axum::Router;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::SessionVerifier;
use crate::backend::db::{MemoryStore, PgStore, SiteStore};
use crate::backend::leads::{LeadNotifier, LogNotifier, SmtpNotifier};
use crate::backend::render::{PageRenderer, RemoteRenderer, SiteRenderer, TemplateResolver};
use crate::backend::routes::router::create_router;
use crate::backend::seo::IndexNowClient;
use crate::backend::server::config::{ConfigError, RunMode, ServerConfig};
use crate::backend::server::state::AppState;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("Failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing Car Street server in {:?} mode", config.mode);
    config.validate()?;

    let store = load_store(&config).await?;
    let state = AppState::new(config, store);

    tracing::info!("Router configured");
    Ok(create_router(state))
}

async fn load_store(config: &ServerConfig) -> Result<Arc<dyn SiteStore>, InitError> {
    match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await?;
            tracing::info!("Connected to database");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn select_renderer(config: &ServerConfig, store: Arc<dyn SiteStore>) -> Arc<dyn PageRenderer> {
    match (&config.mode, &config.ssr_dev_url) {
        (RunMode::Development, Some(endpoint)) => {
            tracing::info!("Delegating rendering to {}", endpoint);
            Arc::new(RemoteRenderer::new(endpoint.clone()))
        }
        _ => Arc::new(SiteRenderer::new(store, config.site_url.clone())),
    }
}

fn select_notifier(config: &ServerConfig) -> Arc<dyn LeadNotifier> {
    let Some(smtp_url) = &config.smtp_url else {
        tracing::warn!("SMTP_URL not set; lead notifications will only be logged");
        return Arc::new(LogNotifier);
    };
    match SmtpNotifier::new(smtp_url, &config.mail_from, &config.admin_email) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            tracing::error!("Invalid SMTP configuration, falling back to logging: {}", e);
            Arc::new(LogNotifier)
        }
    }
}

impl AppState {
    /// Wire every service for `config` on top of `store`
    pub fn new(config: ServerConfig, store: Arc<dyn SiteStore>) -> Self {
        let sessions = match &config.jwt_secret {
            Some(secret) => Some(SessionVerifier::new(secret)),
            None => {
                tracing::warn!("SUPABASE_JWT_SECRET not set; admin API disabled");
                None
            }
        };

        Self {
            templates: Arc::new(TemplateResolver::from_config(&config)),
            renderer: select_renderer(&config, store.clone()),
            indexnow: IndexNowClient::from_config(&config),
            notifier: select_notifier(&config),
            sessions,
            store,
            config: Arc::new(config),
        }
    }
}
