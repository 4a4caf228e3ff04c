/**
 * Admin Lead Handlers
 *
 * Leads are listed in two views: sell-your-car requests on their own page,
 * and everything else (contact messages and pre-approval applications)
 * under leads. Admins move a lead through its workflow status and keep
 * notes on it.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AdminUser;
use crate::backend::server::state::AppState;
use crate::shared::lead::merge_admin_notes;
use crate::shared::{Lead, LeadKind, LeadUpdate};

/// A lead as the back office shows it
#[derive(Debug, Serialize)]
pub struct LeadView {
    #[serde(flatten)]
    pub lead: Lead,
    pub kind: LeadKind,
    pub admin_notes: Option<String>,
}

impl From<Lead> for LeadView {
    fn from(lead: Lead) -> Self {
        Self { kind: lead.kind(), admin_notes: lead.admin_notes(), lead }
    }
}

async fn leads_where(state: &AppState, keep: impl Fn(LeadKind) -> bool) -> ApiResult<Vec<LeadView>> {
    let leads = state.store.leads().await?;
    Ok(leads.into_iter().filter(|l| keep(l.kind())).map(LeadView::from).collect())
}

/// GET /api/admin/leads
pub async fn list_leads(State(state): State<AppState>) -> ApiResult<Json<Vec<LeadView>>> {
    Ok(Json(leads_where(&state, |kind| kind != LeadKind::SellRequest).await?))
}

/// GET /api/admin/sell-requests
pub async fn list_sell_requests(State(state): State<AppState>) -> ApiResult<Json<Vec<LeadView>>> {
    Ok(Json(leads_where(&state, |kind| kind == LeadKind::SellRequest).await?))
}

/// PATCH /api/admin/leads/{id}
///
/// Omitting `notes` keeps the stored notes as they are.
pub async fn update_lead(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(update): Json<LeadUpdate>,
) -> ApiResult<Json<LeadView>> {
    let existing = state
        .store
        .lead(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Lead not found"))?;

    let notes = match update.notes.as_deref() {
        Some(admin_notes) => merge_admin_notes(existing.notes.as_deref(), admin_notes),
        None => existing.notes,
    };

    let lead = state
        .store
        .update_lead(id, update.status, notes)
        .await?
        .ok_or_else(|| BackendError::not_found("Lead not found"))?;
    tracing::info!("Lead {} set to {} by {}", id, lead.status.as_str(), admin.user_id);
    Ok(Json(lead.into()))
}
