//! Search policy values shared by the mode selector and both strategies.

use propsearch_protocols::EMBEDDING_DIMENSION;

/// Fraction added to a requested maximum price.
pub const MAX_PRICE_TOLERANCE: f64 = 0.10;

/// Fraction removed from a requested minimum price.
pub const MIN_PRICE_TOLERANCE: f64 = 0.05;

/// Result cap for structured search.
pub const STRUCTURED_LIMIT: usize = 20;

/// Result cap for semantic search.
pub const SEMANTIC_LIMIT: usize = 20;

/// Proximity phrases that steer a query toward semantic search.
pub const PROXIMITY_KEYWORDS: &[&str] = &[
    "near",
    "close to",
    "around",
    "nearby",
    "vicinity",
    "walking distance",
    "next to",
    "adjacent",
];

/// Landmark words that steer a query toward semantic search.
pub const LANDMARK_KEYWORDS: &[&str] = &[
    "park", "metro", "station", "airport", "mall", "school", "hospital", "tech", "hub", "plaza",
    "market",
];

/// Tunable values of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    pub max_price_tolerance: f64,
    pub min_price_tolerance: f64,
    pub structured_limit: usize,
    pub semantic_limit: usize,
    /// Required length of the query embedding.
    pub embedding_dimension: usize,
    /// Lowercase phrases.
    pub proximity_keywords: Vec<String>,
    /// Lowercase words.
    pub landmark_keywords: Vec<String>,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_price_tolerance: MAX_PRICE_TOLERANCE,
            min_price_tolerance: MIN_PRICE_TOLERANCE,
            structured_limit: STRUCTURED_LIMIT,
            semantic_limit: SEMANTIC_LIMIT,
            embedding_dimension: EMBEDDING_DIMENSION,
            proximity_keywords: to_owned(PROXIMITY_KEYWORDS),
            landmark_keywords: to_owned(LANDMARK_KEYWORDS),
        }
    }
}

impl SearchPolicy {
    /// Inclusive price ceiling for a requested maximum.
    pub fn price_ceiling(&self, max_price: f64) -> f64 {
        max_price * (1.0 + self.max_price_tolerance)
    }

    /// Inclusive price floor for a requested minimum.
    pub fn price_floor(&self, min_price: f64) -> f64 {
        min_price * (1.0 - self.min_price_tolerance)
    }

    /// Replace both keyword sets. Entries are lowercased and trimmed; blanks are dropped.
    pub fn with_keywords(mut self, proximity: &[String], landmark: &[String]) -> Self {
        self.proximity_keywords = clean_keywords(proximity);
        self.landmark_keywords = clean_keywords(landmark);
        self
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub(crate) fn clean_keywords(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
