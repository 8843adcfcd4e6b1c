//! Query embeddings and the provider contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;

/// Number of components in every stored and query embedding.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// Vector representation.
    pub vector: Vec<f32>,
    /// Dimension of the embedding.
    pub dimension: usize,
}

impl Embedding {
    pub fn new(vector: Vec<f32>) -> Self {
        let dimension = vector.len();
        Self { vector, dimension }
    }

    /// Reject vectors whose length differs from `expected`.
    pub fn ensure_dimension(self, expected: usize) -> Result<Self, EmbeddingError> {
        if self.dimension != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: self.dimension,
            });
        }
        Ok(self)
    }

    /// Cosine distance to a raw vector, in `[0, 2]`.
    ///
    /// Returns `None` when the lengths differ or either vector has zero norm.
    pub fn cosine_distance(&self, other: &[f32]) -> Option<f32> {
        cosine_similarity(&self.vector, other).map(|sim| 1.0 - sim)
    }
}

/// Cosine similarity of two vectors of equal length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some(dot / (norm_a * norm_b))
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider identifier used in logs.
    fn id(&self) -> &str;

    /// Generate the embedding for a query text.
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;
}
