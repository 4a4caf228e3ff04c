/**
 * Admin Authentication Middleware
 *
 * Protects the back-office API. The middleware:
 * 1. Extracts the bearer token from the Authorization header
 * 2. Verifies it as a session JWT
 * 3. Checks that the subject holds the `admin` role
 * 4. Attaches the admin to request extensions for handlers
 *
 * Missing or invalid tokens are rejected with 401, valid sessions without
 * the admin role with 403.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::Role;

/// Admin identity extracted from a verified session
#[derive(Clone, Debug)]
pub struct AuthenticatedAdmin {
    pub user_id: Uuid,
    pub email: Option<String>,
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(&request)
        .ok_or_else(|| BackendError::unauthorized("Missing bearer token"))?;

    let verifier = state.sessions.as_ref().ok_or_else(|| {
        tracing::warn!("SUPABASE_JWT_SECRET not set; rejecting admin request");
        BackendError::unauthorized("Authentication is not configured")
    })?;

    let claims = verifier.verify(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| BackendError::unauthorized("Invalid subject in token"))?;

    if !state.store.has_role(user_id, Role::Admin).await? {
        return Err(BackendError::forbidden("Admin access required"));
    }

    request.extensions_mut().insert(AuthenticatedAdmin { user_id, email: claims.email });
    Ok(next.run(request).await)
}

/// Axum extractor for the admin attached by [`require_admin`]
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthenticatedAdmin);

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = parts.extensions.get::<AuthenticatedAdmin>().cloned().ok_or_else(|| {
            tracing::warn!("AuthenticatedAdmin not found in request extensions");
            StatusCode::UNAUTHORIZED
        })?;
        Ok(AdminUser(admin))
    }
}
