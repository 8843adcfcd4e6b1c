//! Nearest-neighbor retrieval over listing embeddings.
//!
//! Only the city and the price bounds restrict a semantic search. Locality,
//! configuration, readiness and project name are left to the embedding.

use tracing::{debug, warn};

use propsearch_protocols::{
    Constraint, EmbeddingProvider, ParsedFilters, PropertyStore, SearchError, VectorQuery,
};

use crate::outcome::Retrieval;
use crate::policy::SearchPolicy;

/// Constraint subset applied to a semantic search.
///
/// Price bounds are applied only when strictly positive.
pub fn semantic_constraints(filters: &ParsedFilters, policy: &SearchPolicy) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    if let Some(ref city) = filters.city {
        constraints.push(Constraint::CityEquals(city.clone()));
    }
    if let Some(max_price) = filters.max_price.filter(|p| *p > 0.0) {
        constraints.push(Constraint::PriceAtMost(policy.price_ceiling(max_price)));
    }
    if let Some(min_price) = filters.min_price.filter(|p| *p > 0.0) {
        constraints.push(Constraint::PriceAtLeast(policy.price_floor(min_price)));
    }

    constraints
}

/// Embed `query` and rank matching records by cosine distance.
///
/// Embedding failures are returned; store failures yield an empty, degraded result.
pub async fn semantic_search(
    store: &dyn PropertyStore,
    embedder: &dyn EmbeddingProvider,
    query: &str,
    filters: &ParsedFilters,
    policy: &SearchPolicy,
) -> Result<Retrieval, SearchError> {
    let embedding = embedder
        .embed(query)
        .await
        .and_then(|e| e.ensure_dimension(policy.embedding_dimension))?;

    let vector_query = VectorQuery {
        vector: embedding.vector,
        constraints: semantic_constraints(filters, policy),
        limit: policy.semantic_limit,
    };
    debug!(
        store = store.id(),
        embedder = embedder.id(),
        constraints = vector_query.constraints.len(),
        limit = vector_query.limit,
        "Running semantic search"
    );

    match store.nearest(vector_query).await {
        Ok(mut scored) => {
            scored.sort_by(|a, b| a.compare_distance(b));
            scored.truncate(policy.semantic_limit);
            Ok(Retrieval::found(
                scored.into_iter().map(|s| s.record).collect(),
            ))
        }
        Err(e) => {
            warn!(store = store.id(), error = %e, "Semantic search failed");
            Ok(Retrieval::store_failed())
        }
    }
}
