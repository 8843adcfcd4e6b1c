//! Property store contract and the query vocabulary it understands.
//!
//! The constraint and ordering sets are closed: a store only has to know
//! how to evaluate the variants below, either natively (SQL) or through
//! [`Constraint::matches`] and [`SortKey::compare`].

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::embedding::EMBEDDING_DIMENSION;
use crate::error::StoreError;
use crate::types::{PropertyRecord, Readiness};

/// Normalized configuration labels that denote office space.
pub const OFFICE_ALIASES: [&str; 2] = ["office", "officespace"];

/// Lowercase a configuration code and strip all whitespace.
pub fn normalize_bhk(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A configuration predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BhkPattern {
    /// Matches any office alias.
    Office,
    /// Matches a single normalized code.
    Exact(String),
}

impl BhkPattern {
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_bhk(raw);
        if OFFICE_ALIASES.contains(&normalized.as_str()) {
            Self::Office
        } else {
            Self::Exact(normalized)
        }
    }

    /// Normalized values this pattern accepts.
    pub fn accepted(&self) -> Vec<String> {
        match self {
            Self::Office => OFFICE_ALIASES.iter().map(|s| s.to_string()).collect(),
            Self::Exact(code) => vec![code.clone()],
        }
    }

    pub fn matches(&self, bhk: &str) -> bool {
        let normalized = normalize_bhk(bhk);
        match self {
            Self::Office => OFFICE_ALIASES.contains(&normalized.as_str()),
            Self::Exact(code) => *code == normalized,
        }
    }
}

/// A single conjunctive predicate over a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Case-insensitive equality on city.
    CityEquals(String),
    /// Case-insensitive substring on locality.
    LocalityContains(String),
    /// Normalized configuration match.
    Bhk(BhkPattern),
    /// `base_price <= bound`. Already includes any tolerance.
    PriceAtMost(f64),
    /// `base_price >= bound`. Already includes any tolerance.
    PriceAtLeast(f64),
    /// Exact readiness.
    ReadinessIs(Readiness),
    /// Case-insensitive substring on project name.
    NameContains(String),
}

impl Constraint {
    /// Evaluate against a record. Absent fields never match.
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        match self {
            Self::CityEquals(city) => record
                .city
                .as_deref()
                .is_some_and(|c| c.to_lowercase() == city.to_lowercase()),
            Self::LocalityContains(locality) => record
                .locality
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&locality.to_lowercase())),
            Self::Bhk(pattern) => record.bhk.as_deref().is_some_and(|b| pattern.matches(b)),
            Self::PriceAtMost(bound) => record.base_price.is_some_and(|p| p <= *bound),
            Self::PriceAtLeast(bound) => record.base_price.is_some_and(|p| p >= *bound),
            Self::ReadinessIs(readiness) => record.readiness == *readiness,
            Self::NameContains(name) => record.name.to_lowercase().contains(&name.to_lowercase()),
        }
    }
}

/// Evaluate a conjunction of constraints.
pub fn matches_all(constraints: &[Constraint], record: &PropertyRecord) -> bool {
    constraints.iter().all(|c| c.matches(record))
}

/// Ranking keys for predicate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// "Ready to Move" before everything else.
    ReadyToMoveFirst,
    /// Ascending price, absent prices last.
    PriceAscending,
}

impl SortKey {
    pub fn compare(&self, a: &PropertyRecord, b: &PropertyRecord) -> Ordering {
        match self {
            Self::ReadyToMoveFirst => readiness_rank(a).cmp(&readiness_rank(b)),
            Self::PriceAscending => match (a.base_price, b.base_price) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

fn readiness_rank(record: &PropertyRecord) -> u8 {
    if record.readiness == Readiness::ReadyToMove { 0 } else { 1 }
}

/// Compare two records by a sequence of keys.
pub fn compare_by(keys: &[SortKey], a: &PropertyRecord, b: &PropertyRecord) -> Ordering {
    keys.iter()
        .map(|key| key.compare(a, b))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Filtered, ordered, limited fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateQuery {
    pub constraints: Vec<Constraint>,
    pub order: Vec<SortKey>,
    pub limit: usize,
}

/// Nearest-neighbor fetch by cosine distance, restricted by constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorQuery {
    pub vector: Vec<f32>,
    pub constraints: Vec<Constraint>,
    pub limit: usize,
}

/// A record with its cosine distance to the query vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: PropertyRecord,
    /// `None` when the record has no usable embedding.
    pub distance: Option<f32>,
}

impl ScoredRecord {
    /// Ascending distance; records without a distance sort last.
    pub fn compare_distance(&self, other: &Self) -> Ordering {
        match (self.distance, other.distance) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Check a record before it is written to a store.
///
/// The ID must be non-blank and an embedding, when present, must have
/// exactly [`EMBEDDING_DIMENSION`] finite components.
pub fn validate_record(record: &PropertyRecord) -> Result<(), StoreError> {
    let invalid = |reason: String| StoreError::InvalidRecord {
        id: record.id.clone(),
        reason,
    };

    if record.id.trim().is_empty() {
        return Err(invalid("id is blank".to_string()));
    }
    if let Some(ref embedding) = record.embedding {
        if embedding.len() != EMBEDDING_DIMENSION {
            return Err(invalid(format!(
                "embedding has {} components, expected {EMBEDDING_DIMENSION}",
                embedding.len()
            )));
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(invalid("embedding has non-finite components".to_string()));
        }
    }
    if record.base_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(invalid("base price must be a non-negative amount".to_string()));
    }
    Ok(())
}

/// Number of records per city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    pub count: u64,
}

/// Core trait for property stores.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Returns the store ID.
    fn id(&self) -> &str;

    /// Records matching every constraint, ordered by `order` then insertion order.
    async fn query(&self, query: PredicateQuery) -> Result<Vec<PropertyRecord>, StoreError>;

    /// Records matching every constraint, nearest first.
    async fn nearest(&self, query: VectorQuery) -> Result<Vec<ScoredRecord>, StoreError>;

    /// Retrieve a record by ID.
    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>, StoreError>;

    /// Distinct known cities, sorted ascending.
    async fn cities(&self) -> Result<Vec<String>, StoreError>;

    /// Record counts per city, largest first.
    async fn city_counts(&self) -> Result<Vec<CityCount>, StoreError>;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
