//! Choice between structured and semantic retrieval.

use propsearch_protocols::{ParsedFilters, SearchMode};

use crate::policy::{clean_keywords, SearchPolicy};

/// Keyword heuristic deciding the retrieval strategy.
#[derive(Debug, Clone)]
pub struct ModeSelector {
    proximity: Vec<String>,
    landmark: Vec<String>,
}

impl ModeSelector {
    /// Keywords are lowercased and trimmed, then matched as substrings.
    pub fn new(proximity: Vec<String>, landmark: Vec<String>) -> Self {
        Self {
            proximity: clean_keywords(&proximity),
            landmark: clean_keywords(&landmark),
        }
    }

    pub fn from_policy(policy: &SearchPolicy) -> Self {
        Self::new(
            policy.proximity_keywords.clone(),
            policy.landmark_keywords.clone(),
        )
    }

    /// Semantic when no structural filter is present or the query mentions
    /// proximity or a landmark; structured otherwise.
    pub fn select(&self, filters: &ParsedFilters, query: &str) -> SearchMode {
        if !filters.has_structural_fields() {
            return SearchMode::Semantic;
        }

        if self.matched_keyword(query).is_some() {
            SearchMode::Semantic
        } else {
            SearchMode::Structured
        }
    }

    /// First keyword found in the lowercased query.
    pub fn matched_keyword(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();
        self.proximity
            .iter()
            .chain(self.landmark.iter())
            .find(|keyword| query.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::from_policy(&SearchPolicy::default())
    }
}
