//! Health check handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// Health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
}

/// Component health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check handler. Probes the store with a city listing.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.engine.store();
    let store_health = match store.cities().await {
        Ok(_) => ComponentHealth {
            name: format!("store:{}", store.id()),
            status: HealthStatus::Healthy,
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "Store health probe failed");
            ComponentHealth {
                name: format!("store:{}", store.id()),
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
            }
        }
    };

    let components = vec![
        ComponentHealth {
            name: "api".to_string(),
            status: HealthStatus::Healthy,
            message: None,
        },
        store_health,
    ];

    Json(HealthResponse {
        status: overall_status(&components),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        components,
    })
}

/// Unhealthy if any component is.
fn overall_status(components: &[ComponentHealth]) -> HealthStatus {
    if components.iter().any(|c| c.status == HealthStatus::Unhealthy) {
        HealthStatus::Unhealthy
    } else {
        HealthStatus::Healthy
    }
}

/// Liveness probe (Kubernetes).
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}
