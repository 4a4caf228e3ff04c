/**
 * Lead Submission Handlers
 *
 * Public endpoints behind the contact, sell-your-car and pre-approval
 * forms. Each handler validates the payload, stores the lead and queues
 * an email to the admin address.
 *
 * # Routes
 *
 * - `POST /api/contact`
 * - `POST /api/sell-requests`
 * - `POST /api/pre-approval`
 *
 * All three answer `201 {"id": ...}` on success and a 400 JSON error when
 * validation fails.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::error::ApiResult;
use crate::backend::leads::notify::{
    contact_email, notify_in_background, pre_approval_email, sell_request_email,
};
use crate::backend::server::state::AppState;
use crate::shared::{ContactForm, PreApprovalForm, SellRequestForm};

#[derive(Debug, Serialize)]
pub struct LeadCreated {
    pub id: Uuid,
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> ApiResult<(StatusCode, Json<LeadCreated>)> {
    let email = contact_email(&form);
    let lead = state.store.insert_lead(form.into_lead()?).await?;
    tracing::info!("Contact submission {} stored", lead.id);

    notify_in_background(state.notifier.clone(), email);
    Ok((StatusCode::CREATED, Json(LeadCreated { id: lead.id })))
}

/// POST /api/sell-requests
pub async fn submit_sell_request(
    State(state): State<AppState>,
    Json(form): Json<SellRequestForm>,
) -> ApiResult<(StatusCode, Json<LeadCreated>)> {
    let email = sell_request_email(&form, &state.config.site_url);
    let lead = state.store.insert_lead(form.into_lead()?).await?;
    tracing::info!("Sell request {} stored", lead.id);

    notify_in_background(state.notifier.clone(), email);
    Ok((StatusCode::CREATED, Json(LeadCreated { id: lead.id })))
}

/// POST /api/pre-approval
pub async fn submit_pre_approval(
    State(state): State<AppState>,
    Json(form): Json<PreApprovalForm>,
) -> ApiResult<(StatusCode, Json<LeadCreated>)> {
    let email = pre_approval_email(&form, &state.config.site_url);
    let lead = state.store.insert_lead(form.into_lead()?).await?;
    tracing::info!("Pre-approval application {} stored", lead.id);

    notify_in_background(state.notifier.clone(), email);
    Ok((StatusCode::CREATED, Json(LeadCreated { id: lead.id })))
}
