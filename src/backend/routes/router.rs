/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public API routes (forms, catalog)
 * 2. SEO routes (sitemaps, IndexNow key file)
 * 3. Admin API, nested under `/api/admin`
 * 4. Fallback: built assets in production, then SSR for everything else
 *
 * # Static Assets
 *
 * In production the client build under `dist/client` is served below the
 * base path, compressed, without directory index files, so `/` and every
 * other page route still reach SSR. Development serves no assets; the
 * front-end dev server does.
 */

use axum::{handler::Handler, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::render::handler::ssr;
use crate::backend::routes::admin_routes::admin_router;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::seo_routes::configure_seo_routes;
use crate::backend::server::state::AppState;

/// Directory holding the client build, relative to the root directory
pub const CLIENT_DIST_DIR: &str = "dist/client";

pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let router = configure_api_routes(Router::new());
    let router = configure_seo_routes(router, app_state.indexnow.key());
    let router = router.nest("/api/admin", admin_router(app_state.clone()));

    let router = if config.mode.is_production() {
        let assets = ServeDir::new(config.root_dir.join(CLIENT_DIST_DIR))
            .append_index_html_on_directories(false)
            .fallback(ssr.with_state(app_state.clone()));

        let router = if config.base == "/" {
            router.fallback_service(assets)
        } else {
            router
                .nest_service(config.base.trim_end_matches('/'), assets)
                .fallback(ssr)
        };
        router.layer(CompressionLayer::new())
    } else {
        router.fallback(ssr)
    };

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
