/**
 * Admin User Handlers
 *
 * Accounts are created by the hosted auth service; the back office only
 * lists profiles and grants or revokes roles.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AdminUser;
use crate::backend::server::state::AppState;
use crate::shared::{Role, UserWithRoles};

/// GET /api/admin/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserWithRoles>>> {
    Ok(Json(state.store.users().await?))
}

/// PUT /api/admin/users/{id}/roles/{role}
pub async fn grant_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path((user_id, role)): Path<(Uuid, String)>,
) -> ApiResult<StatusCode> {
    let role: Role = role.parse()?;
    state.store.grant_role(user_id, role).await?;
    tracing::info!("Role {} granted to {} by {}", role.as_str(), user_id, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/users/{id}/roles/{role}
pub async fn revoke_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path((user_id, role)): Path<(Uuid, String)>,
) -> ApiResult<StatusCode> {
    let role: Role = role.parse()?;
    if !state.store.revoke_role(user_id, role).await? {
        return Err(BackendError::not_found("User does not hold that role"));
    }
    tracing::info!("Role {} revoked from {} by {}", role.as_str(), user_id, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
