/**
 * Admin API Routes
 *
 * Everything here is nested under `/api/admin` and guarded by
 * `require_admin`: 401 without a valid session, 403 without the admin
 * role.
 *
 * ## Dashboard
 * - `GET /dashboard`
 *
 * ## Vehicles
 * - `GET|POST /vehicles`
 * - `GET|PUT|DELETE /vehicles/{id}`
 * - `POST /vehicles/{id}/images`, `DELETE /vehicles/{id}/images/{image_id}`
 * - `PUT /vehicles/{id}/images/{image_id}/primary`
 * - `PUT /vehicles/{id}/images/order`
 *
 * ## Leads
 * - `GET /leads`, `GET /sell-requests`, `PATCH /leads/{id}`
 *
 * ## Users
 * - `GET /users`, `PUT|DELETE /users/{id}/roles/{role}`
 *
 * ## FAQs
 * - `GET|POST /faqs`, `PUT|DELETE /faqs/{id}`
 *
 * ## IndexNow
 * - `POST /indexnow`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::backend::admin::{dashboard, faqs, leads, users, vehicles};
use crate::backend::middleware::require_admin;
use crate::backend::seo::handlers::submit_indexnow;
use crate::backend::server::state::AppState;

pub fn admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        // Vehicles
        .route("/vehicles", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route(
            "/vehicles/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/vehicles/{id}/images", post(vehicles::add_image))
        .route("/vehicles/{id}/images/order", put(vehicles::reorder_images))
        .route("/vehicles/{id}/images/{image_id}", delete(vehicles::delete_image))
        .route(
            "/vehicles/{id}/images/{image_id}/primary",
            put(vehicles::set_primary_image),
        )
        // Leads
        .route("/leads", get(leads::list_leads))
        .route("/leads/{id}", patch(leads::update_lead))
        .route("/sell-requests", get(leads::list_sell_requests))
        // Users
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}/roles/{role}",
            put(users::grant_role).delete(users::revoke_role),
        )
        // FAQs
        .route("/faqs", get(faqs::list_faqs).post(faqs::create_faq))
        .route("/faqs/{id}", put(faqs::update_faq).delete(faqs::delete_faq))
        // IndexNow
        .route("/indexnow", post(submit_indexnow))
        .route_layer(from_fn_with_state(state, require_admin))
}
