/**
 * Public API Routes
 *
 * - `POST /api/contact` - Contact form
 * - `POST /api/sell-requests` - Sell-your-car wizard
 * - `POST /api/pre-approval` - Financing application
 * - `GET /api/vehicles` - Available vehicles, inventory filters apply
 * - `GET /api/vehicles/{id}` - Single vehicle
 * - `GET /api/faqs` - Active FAQs in display order
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::catalog::{get_vehicle, list_faqs, list_vehicles};
use crate::backend::leads::handlers::{submit_contact, submit_pre_approval, submit_sell_request};
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Lead forms
        .route("/api/contact", post(submit_contact))
        .route("/api/sell-requests", post(submit_sell_request))
        .route("/api/pre-approval", post(submit_pre_approval))
        // Catalog
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles/{id}", get(get_vehicle))
        .route("/api/faqs", get(list_faqs))
}
