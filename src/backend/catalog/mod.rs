//! Public catalog API
//!
//! Read-only JSON endpoints used by the client-side inventory and contact
//! pages after hydration.

use axum::{
    extract::{Path, RawQuery, State},
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::db::SiteStore;
use crate::shared::{Faq, InventoryFilter, Vehicle};

/// GET /api/vehicles
///
/// Available vehicles only, filtered with the inventory page's query parameters.
pub async fn list_vehicles(
    State(store): State<Arc<dyn SiteStore>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Vec<Vehicle>>> {
    let filter = InventoryFilter::from_query(query.as_deref().unwrap_or_default());
    let vehicles = store.available_vehicles().await?;
    Ok(Json(filter.apply(vehicles)))
}

/// GET /api/vehicles/{id}
pub async fn get_vehicle(
    State(store): State<Arc<dyn SiteStore>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vehicle>> {
    let vehicle = store
        .vehicle(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Vehicle not found"))?;
    Ok(Json(vehicle))
}

/// GET /api/faqs
pub async fn list_faqs(State(store): State<Arc<dyn SiteStore>>) -> ApiResult<Json<Vec<Faq>>> {
    Ok(Json(store.faqs(true).await?))
}
