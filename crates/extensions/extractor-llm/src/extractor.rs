//! Chat-completions filter extractor.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use propsearch_protocols::{ExtractedFields, ExtractionError, FilterExtractor};

use crate::api::{ApiMessage, ApiRequest, ApiResponse, ResponseFormat};
use crate::parser::parse_fields;
use crate::prompt::build_prompt;

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_EXTRACTOR_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_EXTRACTOR_MODEL: &str = "openai/gpt-oss-120b";

/// Configuration for the LLM extractor.
#[derive(Debug, Clone)]
pub struct LlmExtractorConfig {
    /// Bearer token. Extraction fails with `NotConfigured` when absent.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl LlmExtractorConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_EXTRACTOR_URL.to_string(),
            model: DEFAULT_EXTRACTOR_MODEL.to_string(),
            temperature: 0.1,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Filter extractor backed by an OpenAI-compatible chat model in JSON mode.
pub struct LlmFilterExtractor {
    client: reqwest::Client,
    config: LlmExtractorConfig,
}

impl LlmFilterExtractor {
    pub fn new(config: LlmExtractorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    async fn send_request(
        &self,
        api_key: &str,
        request: &ApiRequest<'_>,
    ) -> Result<reqwest::Response, ExtractionError> {
        let response = self
            .client
            .post(self.config.endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ExtractionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ApiError { status, message });
        }

        Ok(response)
    }
}

#[async_trait]
impl FilterExtractor for LlmFilterExtractor {
    fn id(&self) -> &str {
        "llm"
    }

    async fn extract(&self, query: &str) -> Result<ExtractedFields, ExtractionError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            ExtractionError::NotConfigured("extractor API key is not set".to_string())
        })?;

        let (system, user) = build_prompt(query);
        let request = ApiRequest {
            model: &self.config.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat::json_object(),
        };

        let response = self.send_request(api_key, &request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ExtractionError::Malformed("response has no content".to_string()))?;

        let fields = parse_fields(&content)?;
        debug!(model = %self.config.model, ?fields, "Extracted filter fields");
        Ok(fields)
    }
}

/// Extractor used when extraction is switched off. Always yields no fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledExtractor;

#[async_trait]
impl FilterExtractor for DisabledExtractor {
    fn id(&self) -> &str {
        "disabled"
    }

    async fn extract(&self, _query: &str) -> Result<ExtractedFields, ExtractionError> {
        Ok(ExtractedFields::default())
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
