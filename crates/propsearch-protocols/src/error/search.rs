//! Engine-level search errors.

use thiserror::Error;

use super::EmbeddingError;

/// Errors that abort a search request.
///
/// Extraction and store failures never appear here; they degrade the
/// response instead.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query is required")]
    EmptyQuery,

    #[error("Semantic search unavailable: {0}")]
    Embedding(#[from] EmbeddingError),
}
