//! Search and lookup handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::{debug, info};

use propsearch_core::format_card;
use propsearch_protocols::{CityCount, PropertyCard, PropertyRecord, SearchRequest, SearchResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// A stored property with its display card.
#[derive(Debug, Serialize)]
pub struct PropertyDetail {
    /// The record without its embedding.
    pub property: PropertyRecord,
    pub card: PropertyCard,
}

/// Run a search.
///
/// POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    info!(query = %req.query, "Search request");
    let outcome = state.engine.search(&req.query).await?;
    Ok(Json(outcome.into_response()))
}

/// Look up one property.
///
/// GET /api/properties/{id}
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PropertyDetail>, ApiError> {
    let mut property = state
        .engine
        .store()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Property not found: {}", id)))?;

    debug!(id = %property.id, "Property lookup");
    property.embedding = None;
    let card = format_card(&property);
    Ok(Json(PropertyDetail { property, card }))
}

/// Distinct known cities, sorted.
///
/// GET /api/cities
pub async fn list_cities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.engine.store().cities().await?))
}

/// Record count per known city, most listings first.
///
/// GET /api/cities/stats
pub async fn city_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CityCount>>, ApiError> {
    Ok(Json(state.engine.store().city_counts().await?))
}
