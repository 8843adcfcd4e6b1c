//! Filtered retrieval ranked by readiness then price.

use tracing::{debug, warn};

use propsearch_protocols::{
    compare_by, BhkPattern, Constraint, ParsedFilters, PredicateQuery, PropertyStore, SortKey,
};

use crate::outcome::Retrieval;
use crate::policy::SearchPolicy;

/// Ranking of structured results. Ties keep store order.
pub const STRUCTURED_ORDER: [SortKey; 2] = [SortKey::ReadyToMoveFirst, SortKey::PriceAscending];

/// Conjunctive constraints for every present filter field.
pub fn structured_constraints(filters: &ParsedFilters, policy: &SearchPolicy) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    if let Some(ref city) = filters.city {
        constraints.push(Constraint::CityEquals(city.clone()));
    }
    if let Some(ref locality) = filters.locality {
        constraints.push(Constraint::LocalityContains(locality.clone()));
    }
    if let Some(ref bhk) = filters.bhk {
        constraints.push(Constraint::Bhk(BhkPattern::parse(bhk)));
    }
    if let Some(max_price) = filters.max_price {
        constraints.push(Constraint::PriceAtMost(policy.price_ceiling(max_price)));
    }
    if let Some(min_price) = filters.min_price {
        constraints.push(Constraint::PriceAtLeast(policy.price_floor(min_price)));
    }
    if let Some(readiness) = filters.readiness {
        constraints.push(Constraint::ReadinessIs(readiness));
    }
    if let Some(ref name) = filters.project_name {
        constraints.push(Constraint::NameContains(name.clone()));
    }

    constraints
}

/// Run a structured search. Store failures yield an empty, degraded result.
pub async fn structured_search(
    store: &dyn PropertyStore,
    filters: &ParsedFilters,
    policy: &SearchPolicy,
) -> Retrieval {
    let query = PredicateQuery {
        constraints: structured_constraints(filters, policy),
        order: STRUCTURED_ORDER.to_vec(),
        limit: policy.structured_limit,
    };
    debug!(
        store = store.id(),
        constraints = query.constraints.len(),
        limit = query.limit,
        "Running structured search"
    );

    match store.query(query).await {
        Ok(mut records) => {
            records.sort_by(|a, b| compare_by(&STRUCTURED_ORDER, a, b));
            records.truncate(policy.structured_limit);
            Retrieval::found(records)
        }
        Err(e) => {
            warn!(store = store.id(), error = %e, "Structured search failed");
            Retrieval::store_failed()
        }
    }
}

#[cfg(test)]
#[path = "structured_tests.rs"]
mod tests;
