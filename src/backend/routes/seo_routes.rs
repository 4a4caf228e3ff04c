/**
 * SEO Routes
 *
 * - `GET /sitemap.xml` - Combined sitemap
 * - `GET /sitemap-index.xml` - Sitemap index
 * - `GET /sitemap-static.xml` - Landing pages
 * - `GET /sitemap-inventory.xml` - Available vehicles
 * - `GET /{key}.txt` - IndexNow key file
 *
 * The key file route is registered with the literal configured key, so any
 * other `*.txt` path falls through to static files and SSR.
 */

use axum::{routing::get, Router};

use crate::backend::seo::handlers::{
    indexnow_key, sitemap, sitemap_index, sitemap_inventory, sitemap_static,
};
use crate::backend::server::state::AppState;

pub fn configure_seo_routes(router: Router<AppState>, indexnow_key_value: &str) -> Router<AppState> {
    router
        .route("/sitemap.xml", get(sitemap))
        .route("/sitemap-index.xml", get(sitemap_index))
        .route("/sitemap-static.xml", get(sitemap_static))
        .route("/sitemap-inventory.xml", get(sitemap_inventory))
        .route(&format!("/{indexnow_key_value}.txt"), get(indexnow_key))
}
