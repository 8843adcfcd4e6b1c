//! Hugging Face inference API embedding provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use propsearch_protocols::{Embedding, EmbeddingError, EmbeddingProvider, EMBEDDING_DIMENSION};

use crate::client::{build_client, post_json};

/// Inference API base; the model ID is appended as a path.
pub const DEFAULT_HF_URL: &str = "https://api-inference.huggingface.co/models";

/// 384-dimension sentence embedding model.
pub const DEFAULT_HF_MODEL: &str = "BAAI/bge-small-en-v1.5";

/// Configuration for Hugging Face embeddings.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Access token. Embedding fails with `NotConfigured` when absent.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl HuggingFaceConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_HF_MODEL.to_string(),
            base_url: DEFAULT_HF_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// Hugging Face feature-extraction embedding provider.
pub struct HuggingFaceEmbedding {
    client: reqwest::Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceEmbedding {
    pub fn new(config: HuggingFaceConfig) -> Self {
        Self {
            client: build_client(config.timeout),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// The API answers with either a batch of vectors or a single vector.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Vec<f32>>),
    Single(Vec<f32>),
}

impl InferenceResponse {
    fn into_vector(self) -> Option<Vec<f32>> {
        match self {
            Self::Batch(batch) => batch.into_iter().next(),
            Self::Single(vector) => Some(vector),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceEmbedding {
    fn id(&self) -> &str {
        "huggingface"
    }

    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            EmbeddingError::NotConfigured("Hugging Face API key is not set".to_string())
        })?;
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("empty text".to_string()));
        }

        let request = InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let response = post_json(&self.client, &self.config.endpoint(), api_key, &request).await?;

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Failed(format!("Unexpected response format: {}", e)))?;
        let vector = parsed
            .into_vector()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| EmbeddingError::Failed("Empty embedding in response".to_string()))?;

        debug!(model = %self.config.model, dimension = vector.len(), "Generated query embedding");
        Ok(Embedding::new(vector))
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer, key: Option<&str>) -> HuggingFaceEmbedding {
        HuggingFaceEmbedding::new(
            HuggingFaceConfig::new(key.map(str::to_string)).with_base_url(server.uri()),
        )
    }

    #[test]
    fn test_config_defaults() {
        let config = HuggingFaceConfig::new(None);
        assert_eq!(config.model, "BAAI/bge-small-en-v1.5");
        assert_eq!(
            config.endpoint(),
            "https://api-inference.huggingface.co/models/BAAI/bge-small-en-v1.5"
        );
    }

    #[tokio::test]
    async fn test_nested_response() {
        let server = MockServer::start().await;
        let body = serde_json::json!([vec![0.25f32; EMBEDDING_DIMENSION]]);

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/BAAI/bge-small-en-v1.5"))
            .and(matchers::header("Authorization", "Bearer hf-test"))
            .and(matchers::body_partial_json(serde_json::json!({
                "inputs": "homes near the park",
                "options": {"wait_for_model": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let embedding = provider(&server, Some("hf-test"))
            .embed("homes near the park")
            .await
            .unwrap();
        assert_eq!(embedding.dimension, EMBEDDING_DIMENSION);
    }

    #[tokio::test]
    async fn test_flat_response() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([0.1, 0.2, 0.3])),
            )
            .mount(&server)
            .await;

        let embedding = provider(&server, Some("k")).embed("q").await.unwrap();
        assert_eq!(embedding.vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_unexpected_shape() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "loading"})),
            )
            .mount(&server)
            .await;

        let result = provider(&server, Some("k")).embed("q").await;
        assert!(matches!(result, Err(EmbeddingError::Failed(_))));
    }

    #[tokio::test]
    async fn test_api_error() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Model is loading"))
            .mount(&server)
            .await;

        match provider(&server, Some("k")).embed("q").await {
            Err(EmbeddingError::ApiError { status, message }) => {
                assert_eq!(status, 503);
                assert!(message.contains("loading"));
            }
            other => panic!("Expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = provider(&server, None).embed("q").await;
        assert!(matches!(result, Err(EmbeddingError::NotConfigured(_))));
    }
}
