//! Feature-hashing embedding for offline runs (not semantic).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use propsearch_protocols::{Embedding, EmbeddingError, EmbeddingProvider, EMBEDDING_DIMENSION};

/// Deterministic bag-of-words embedding.
///
/// Identical texts map to identical vectors; nothing else is guaranteed.
pub struct HashEmbedding {
    dimension: usize,
}

impl HashEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for (i, word) in text.split_whitespace().enumerate() {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let hash = hasher.finish();

            for j in 0..self.dimension {
                let idx = (i + j) % self.dimension;
                let val = ((hash >> (j % 64)) & 0xFF) as f32 / 255.0 - 0.5;
                vector[idx] += val;
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashEmbedding {
    fn default() -> Self {
        Self::new(EMBEDDING_DIMENSION)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedding {
    fn id(&self) -> &str {
        "hash"
    }

    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("empty text".to_string()));
        }
        Ok(Embedding::new(self.hash_text(text)))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_dimension() {
        let provider = HashEmbedding::default();
        let emb = provider.embed("2bhk in pune").await.unwrap();
        assert_eq!(emb.dimension, EMBEDDING_DIMENSION);
        assert_eq!(provider.dimension(), EMBEDDING_DIMENSION);
    }

    #[tokio::test]
    async fn test_same_text_same_vector() {
        let provider = HashEmbedding::default();
        let a = provider.embed("Flats near Metro").await.unwrap();
        let b = provider.embed("flats near metro").await.unwrap();
        let c = provider.embed("villa by the lake").await.unwrap();

        assert!(a.cosine_distance(&b.vector).unwrap() < 0.001);
        assert!(a.cosine_distance(&c.vector).unwrap() > 0.1);
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let provider = HashEmbedding::default();
        assert!(matches!(
            provider.embed("  ").await,
            Err(EmbeddingError::InvalidInput(_))
        ));
    }
}
