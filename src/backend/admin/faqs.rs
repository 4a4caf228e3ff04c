//! Admin FAQ handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::db::SiteStore;
use crate::shared::{Faq, FaqInput};

/// GET /api/admin/faqs
///
/// Includes inactive entries.
pub async fn list_faqs(State(store): State<Arc<dyn SiteStore>>) -> ApiResult<Json<Vec<Faq>>> {
    Ok(Json(store.faqs(false).await?))
}

/// POST /api/admin/faqs
pub async fn create_faq(
    State(store): State<Arc<dyn SiteStore>>,
    Json(input): Json<FaqInput>,
) -> ApiResult<(StatusCode, Json<Faq>)> {
    input.validate()?;
    Ok((StatusCode::CREATED, Json(store.create_faq(input).await?)))
}

/// PUT /api/admin/faqs/{id}
pub async fn update_faq(
    State(store): State<Arc<dyn SiteStore>>,
    Path(id): Path<Uuid>,
    Json(input): Json<FaqInput>,
) -> ApiResult<Json<Faq>> {
    input.validate()?;
    let faq = store
        .update_faq(id, input)
        .await?
        .ok_or_else(|| BackendError::not_found("FAQ not found"))?;
    Ok(Json(faq))
}

/// DELETE /api/admin/faqs/{id}
pub async fn delete_faq(State(store): State<Arc<dyn SiteStore>>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    if !store.delete_faq(id).await? {
        return Err(BackendError::not_found("FAQ not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
