/**
 * SEO Handlers
 *
 * Sitemap endpoints, the IndexNow key file and manual IndexNow submission.
 *
 * # Failure Behaviour
 *
 * The combined `/sitemap.xml` answers a store failure with a 500 and a
 * plain-text body. `/sitemap-inventory.xml` instead degrades to a valid,
 * empty `<urlset>` so crawlers never see an error from the split sitemap.
 */

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::backend::error::ApiResult;
use crate::backend::middleware::AdminUser;
use crate::backend::seo::indexnow::{SubmissionKind, SubmissionResult};
use crate::backend::seo::sitemap::{index_xml, Sitemap};
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

fn xml_response(xml: String) -> Response {
    ([(CONTENT_TYPE, "application/xml")], xml).into_response()
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> Response {
    match state.store.sitemap_vehicles().await {
        Ok(vehicles) => xml_response(Sitemap::combined(&state.config.site_url, &vehicles).into_xml()),
        Err(e) => {
            tracing::error!("Sitemap generation error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                "Error generating sitemap",
            )
                .into_response()
        }
    }
}

/// GET /sitemap-index.xml
pub async fn sitemap_index(State(config): State<Arc<ServerConfig>>) -> Response {
    xml_response(index_xml(&config.site_url, Utc::now().date_naive()))
}

/// GET /sitemap-static.xml
pub async fn sitemap_static(State(config): State<Arc<ServerConfig>>) -> Response {
    xml_response(Sitemap::static_pages(&config.site_url, Utc::now().date_naive()).into_xml())
}

/// GET /sitemap-inventory.xml
pub async fn sitemap_inventory(State(state): State<AppState>) -> Response {
    let vehicles = match state.store.sitemap_vehicles().await {
        Ok(vehicles) => {
            tracing::debug!("Generated inventory sitemap with {} vehicles", vehicles.len());
            vehicles
        }
        Err(e) => {
            tracing::error!("Inventory sitemap query failed, serving empty sitemap: {}", e);
            Vec::new()
        }
    };
    xml_response(Sitemap::inventory(&state.config.site_url, &vehicles).into_xml())
}

/// GET /{key}.txt
pub async fn indexnow_key(State(state): State<AppState>) -> Response {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.indexnow.key().to_string(),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: SubmissionKind,
}

/// POST /api/admin/indexnow
pub async fn submit_indexnow(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<Json<SubmissionResult>> {
    tracing::info!("Manual IndexNow submission by {}", admin.user_id);
    let result = state.indexnow.submit(&request.urls, request.kind).await?;
    Ok(Json(result))
}
