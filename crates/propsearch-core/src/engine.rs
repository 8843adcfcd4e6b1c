//! Search engine wiring the collaborators to the search pipeline.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use propsearch_protocols::{
    EmbeddingProvider, FilterExtractor, ParsedFilters, PropertyStore, SearchError, SearchMode,
};

use crate::formatter::format_card;
use crate::mode::ModeSelector;
use crate::normalizer::FilterNormalizer;
use crate::outcome::{Degradation, SearchOutcome};
use crate::policy::SearchPolicy;
use crate::semantic::semantic_search;
use crate::structured::structured_search;
use crate::summary::SummaryGenerator;

/// Hybrid property search engine.
///
/// Holds no per-request state and is shared behind an `Arc`.
pub struct SearchEngine {
    extractor: Arc<dyn FilterExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn PropertyStore>,
    policy: SearchPolicy,
    normalizer: FilterNormalizer,
    selector: ModeSelector,
    summarizer: SummaryGenerator,
}

impl SearchEngine {
    pub fn new(
        extractor: Arc<dyn FilterExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn PropertyStore>,
    ) -> Self {
        Self::with_policy(extractor, embedder, store, SearchPolicy::default())
    }

    pub fn with_policy(
        extractor: Arc<dyn FilterExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn PropertyStore>,
        policy: SearchPolicy,
    ) -> Self {
        Self {
            selector: ModeSelector::from_policy(&policy),
            extractor,
            embedder,
            store,
            policy,
            normalizer: FilterNormalizer::new(),
            summarizer: SummaryGenerator::new(),
        }
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<dyn PropertyStore> {
        &self.store
    }

    /// Run one search for a free-text query.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let started = Instant::now();
        let mut degradations = Vec::new();

        let filters = match self.extractor.extract(query).await {
            Ok(fields) => self.normalizer.normalize(fields),
            Err(e) => {
                warn!(
                    extractor = self.extractor.id(),
                    error = %e,
                    "Filter extraction failed, searching without filters"
                );
                degradations.push(Degradation::ExtractionFailed);
                ParsedFilters::default()
            }
        };
        debug!(?filters, "Normalized filters");

        let mode = self.selector.select(&filters, query);
        let retrieval = match mode {
            SearchMode::Structured => {
                structured_search(self.store.as_ref(), &filters, &self.policy).await
            }
            SearchMode::Semantic => {
                semantic_search(
                    self.store.as_ref(),
                    self.embedder.as_ref(),
                    query,
                    &filters,
                    &self.policy,
                )
                .await?
            }
        };
        if retrieval.degraded {
            degradations.push(Degradation::StoreFailed);
        }

        let records = retrieval.records;
        let cards = records.iter().map(format_card).collect();
        let summary = self.summarizer.generate(&filters, &records);

        info!(
            %mode,
            results = records.len(),
            degraded = !degradations.is_empty(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search completed"
        );

        Ok(SearchOutcome {
            filters,
            mode,
            records,
            cards,
            summary,
            degradations,
        })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
