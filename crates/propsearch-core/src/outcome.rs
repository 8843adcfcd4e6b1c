//! Result envelopes.

use serde::Serialize;

use propsearch_protocols::{
    ParsedFilters, PropertyCard, PropertyRecord, SearchMode, SearchResponse,
};

/// Records returned by one retrieval strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Retrieval {
    pub records: Vec<PropertyRecord>,
    /// The store failed and `records` is empty as a consequence.
    pub degraded: bool,
}

impl Retrieval {
    pub fn found(records: Vec<PropertyRecord>) -> Self {
        Self {
            records,
            degraded: false,
        }
    }

    pub fn store_failed() -> Self {
        Self {
            records: Vec::new(),
            degraded: true,
        }
    }
}

/// An upstream failure absorbed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// The extractor failed; the search ran with empty filters.
    ExtractionFailed,
    /// The store failed; the search returned no records.
    StoreFailed,
}

/// Everything a search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub filters: ParsedFilters,
    pub mode: SearchMode,
    pub records: Vec<PropertyRecord>,
    pub cards: Vec<PropertyCard>,
    pub summary: String,
    pub degradations: Vec<Degradation>,
}

impl SearchOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    pub fn into_response(self) -> SearchResponse {
        SearchResponse {
            degraded: self.is_degraded(),
            summary: self.summary,
            properties: self.cards,
            mode: self.mode,
        }
    }
}
