//! OpenAI-compatible embedding provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use propsearch_protocols::{Embedding, EmbeddingError, EmbeddingProvider, EMBEDDING_DIMENSION};

use crate::client::{build_client, post_json};

/// Configuration for OpenAI-compatible embeddings.
#[derive(Debug, Clone)]
pub struct OpenAIEmbeddingConfig {
    pub api_key: Option<String>,
    /// Model to use (default: text-embedding-3-small).
    pub model: String,
    /// Base URL for API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Requested output dimension, sent as `dimensions`.
    pub dimension: usize,
    pub timeout: Duration,
}

impl OpenAIEmbeddingConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: "text-embedding-3-small".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            dimension: EMBEDDING_DIMENSION,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set custom base URL (for Azure OpenAI or compatible APIs).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI embedding provider.
pub struct OpenAIEmbedding {
    client: reqwest::Client,
    config: OpenAIEmbeddingConfig,
}

impl OpenAIEmbedding {
    pub fn new(config: OpenAIEmbeddingConfig) -> Self {
        Self {
            client: build_client(config.timeout),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: Vec<&'a str>,
    model: &'a str,
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbedding {
    fn id(&self) -> &str {
        "openai"
    }

    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            EmbeddingError::NotConfigured("OpenAI API key is not set".to_string())
        })?;
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("empty text".to_string()));
        }

        let request = EmbeddingRequest {
            input: vec![text],
            model: &self.config.model,
            dimensions: self.config.dimension,
        };
        let url = format!("{}/embeddings", self.config.base_url.trim_end_matches('/'));
        let response = post_json(&self.client, &url, api_key, &request).await?;

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Failed(format!("Parse error: {}", e)))?;

        let data = embedding_response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Failed("Empty response".to_string()))?;

        debug!(
            model = %self.config.model,
            dimension = data.embedding.len(),
            "Generated query embedding"
        );
        Ok(Embedding::new(data.embedding))
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_config_defaults() {
        let config = OpenAIEmbeddingConfig::new(Some("test-key".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.model, "text-embedding-3-small");
        assert_eq!(config.dimension, 384);
    }

    #[test]
    fn test_config_builder() {
        let config = OpenAIEmbeddingConfig::new(None)
            .with_model("text-embedding-3-large")
            .with_base_url("https://custom.api.com");

        assert_eq!(config.model, "text-embedding-3-large");
        assert_eq!(config.base_url, "https://custom.api.com");
    }

    #[tokio::test]
    async fn test_embed_success() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.5, 0.5]}],
            "model": "text-embedding-3-small"
        });

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/embeddings"))
            .and(matchers::body_partial_json(serde_json::json!({"dimensions": 384})))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAIEmbedding::new(
            OpenAIEmbeddingConfig::new(Some("k".to_string())).with_base_url(server.uri()),
        );
        let embedding = provider.embed("3bhk near metro").await.unwrap();
        assert_eq!(embedding.vector, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn test_embed_empty_data() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;

        let provider = OpenAIEmbedding::new(
            OpenAIEmbeddingConfig::new(Some("k".to_string())).with_base_url(server.uri()),
        );
        assert!(matches!(provider.embed("q").await, Err(EmbeddingError::Failed(_))));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let provider = OpenAIEmbedding::new(OpenAIEmbeddingConfig::new(None));
        assert!(matches!(
            provider.embed("q").await,
            Err(EmbeddingError::NotConfigured(_))
        ));
    }
}
