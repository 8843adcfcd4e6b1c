//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::http::handlers::{chat, city_stats, get_property, list_cities};
use crate::http::monitoring;
use crate::state::AppState;

/// Create the main router.
///
/// ```text
/// /api
///   POST /api/chat             - Search
///   GET  /api/properties/{id}  - Property detail
///   GET  /api/cities           - City list
///   GET  /api/cities/stats     - City counts
///
/// /health - Health check
/// /livez  - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/chat", post(chat))
        .route("/properties/{id}", get(get_property))
        .route("/cities", get(list_cities))
        .route("/cities/stats", get(city_stats))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    Router::new()
        .nest("/api", api_routes)
        .merge(monitoring_routes)
        .merge(liveness_route)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
