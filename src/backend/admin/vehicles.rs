/**
 * Admin Vehicle Handlers
 *
 * Inventory management for the back office. Every write that changes what
 * the public site shows queues an IndexNow submission for the vehicle page
 * and the inventory listing.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AdminUser;
use crate::backend::seo::SubmissionKind;
use crate::backend::server::state::AppState;
use crate::shared::{NewVehicleImage, Vehicle, VehicleImage, VehicleInput};

fn announce_change(state: &AppState, vehicle_id: Uuid) {
    state.indexnow.submit_in_background(
        vec![format!("/vehicle/{vehicle_id}"), "/inventory".to_string()],
        SubmissionKind::Vehicle,
    );
}

fn vehicle_not_found() -> BackendError {
    BackendError::not_found("Vehicle not found")
}

/// GET /api/admin/vehicles
pub async fn list_vehicles(State(state): State<AppState>) -> ApiResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.store.all_vehicles().await?))
}

/// GET /api/admin/vehicles/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vehicle>> {
    let vehicle = state.store.vehicle(id).await?.ok_or_else(vehicle_not_found)?;
    Ok(Json(vehicle))
}

/// POST /api/admin/vehicles
pub async fn create_vehicle(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<VehicleInput>,
) -> ApiResult<(StatusCode, Json<Vehicle>)> {
    input.validate()?;
    let vehicle = state.store.create_vehicle(input).await?;
    tracing::info!("Vehicle {} created by {}", vehicle.id, admin.user_id);

    announce_change(&state, vehicle.id);
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// PUT /api/admin/vehicles/{id}
pub async fn update_vehicle(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(input): Json<VehicleInput>,
) -> ApiResult<Json<Vehicle>> {
    input.validate()?;
    let vehicle = state.store.update_vehicle(id, input).await?.ok_or_else(vehicle_not_found)?;
    tracing::info!("Vehicle {} updated by {}", id, admin.user_id);

    announce_change(&state, id);
    Ok(Json(vehicle))
}

/// DELETE /api/admin/vehicles/{id}
pub async fn delete_vehicle(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !state.store.delete_vehicle(id).await? {
        return Err(vehicle_not_found());
    }
    tracing::info!("Vehicle {} deleted by {}", id, admin.user_id);

    announce_change(&state, id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/vehicles/{id}/images
pub async fn add_image(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(image): Json<NewVehicleImage>,
) -> ApiResult<(StatusCode, Json<VehicleImage>)> {
    image.validate()?;
    let image = state.store.add_image(id, image).await?.ok_or_else(vehicle_not_found)?;
    tracing::info!("Image {} added to vehicle {} by {}", image.id, id, admin.user_id);

    announce_change(&state, id);
    Ok((StatusCode::CREATED, Json(image)))
}

/// DELETE /api/admin/vehicles/{id}/images/{image_id}
pub async fn delete_image(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    if !state.store.delete_image(id, image_id).await? {
        return Err(BackendError::not_found("Image not found"));
    }
    tracing::info!("Image {} removed from vehicle {} by {}", image_id, id, admin.user_id);

    announce_change(&state, id);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/vehicles/{id}/images/{image_id}/primary
pub async fn set_primary_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    if !state.store.set_primary_image(id, image_id).await? {
        return Err(BackendError::not_found("Image not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/vehicles/{id}/images/order
///
/// Body is every image id of the vehicle, each once, in the new display order.
pub async fn reorder_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(ordered): Json<Vec<Uuid>>,
) -> ApiResult<StatusCode> {
    if ordered.is_empty() {
        return Err(BackendError::bad_request("No images to reorder"));
    }
    let vehicle = state.store.vehicle(id).await?.ok_or_else(vehicle_not_found)?;
    // Checked again by the store, which may see images added since the read
    if !vehicle.is_image_permutation(&ordered) || !state.store.reorder_images(id, &ordered).await? {
        return Err(BackendError::bad_request(
            "Image order must list each of the vehicle's images exactly once",
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}
