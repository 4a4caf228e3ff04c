//! Back-office dashboard counts

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::backend::error::ApiResult;
use crate::backend::server::state::AppState;
use crate::shared::VehicleStatus;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub sold_vehicles: usize,
    pub total_leads: usize,
}

/// GET /api/admin/dashboard
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let vehicles = state.store.all_vehicles().await?;
    let leads = state.store.leads().await?;
    let count = |status: VehicleStatus| vehicles.iter().filter(|v| v.status == status).count();

    Ok(Json(DashboardStats {
        total_vehicles: vehicles.len(),
        available_vehicles: count(VehicleStatus::Available),
        sold_vehicles: count(VehicleStatus::Sold),
        total_leads: leads.len(),
    }))
}
