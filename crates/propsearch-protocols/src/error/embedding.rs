//! Embedding provider errors.

use thiserror::Error;

/// Failure of the embedding provider. Fatal for a semantic search.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding provider not configured: {0}")]
    NotConfigured(String),

    #[error("Embedding failed: {0}")]
    Failed(String),

    #[error("Embedding API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
