//! Axum router construction for the technician API.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled so the
//! map front end can call the API from another origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the technician API.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/v1/solar_farms/:farm_id/technicians` -- positions now
/// - `GET /api/v1/solar_farms/:farm_id/technicians/:timestamp` -- positions at a time
///
/// CORS allows any origin, method and header.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route(
            "/api/v1/solar_farms/{farm_id}/technicians",
            get(handlers::current_technicians),
        )
        .route(
            "/api/v1/solar_farms/{farm_id}/technicians/{timestamp}",
            get(handlers::technicians_at),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
