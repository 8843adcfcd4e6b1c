//! # propsearch Protocols
//!
//! Data model and collaborator contracts for the propsearch engine.
//! Contains only definitions - no search logic and no I/O.
//!
//! ## Core Traits
//!
//! - [`FilterExtractor`] - Turns free text into raw filter fields
//! - [`EmbeddingProvider`] - Turns free text into a query vector
//! - [`PropertyStore`] - Executes predicate and nearest-neighbor queries

pub mod embedding;
pub mod error;
pub mod extractor;
pub mod store;
pub mod types;

// Re-export core traits
pub use embedding::{cosine_similarity, Embedding, EmbeddingProvider, EMBEDDING_DIMENSION};
pub use extractor::FilterExtractor;
pub use store::{
    compare_by, matches_all, normalize_bhk, BhkPattern, CityCount, Constraint, PredicateQuery,
    PropertyStore, ScoredRecord, SortKey, VectorQuery, validate_record,
};
pub use error::{EmbeddingError, ExtractionError, SearchError, StoreError};
pub use types::*;
