//! Query embedding providers.
//!
//! - [`HuggingFaceEmbedding`] - Hugging Face inference API (default `BAAI/bge-small-en-v1.5`)
//! - [`OpenAIEmbedding`] - OpenAI-compatible `/embeddings` endpoint
//! - [`HashEmbedding`] - Local feature hashing, not semantic

mod client;
mod hash;
mod huggingface;
mod openai;

pub use hash::HashEmbedding;
pub use huggingface::{HuggingFaceConfig, HuggingFaceEmbedding, DEFAULT_HF_URL, DEFAULT_HF_MODEL};
pub use openai::{OpenAIEmbedding, OpenAIEmbeddingConfig};
