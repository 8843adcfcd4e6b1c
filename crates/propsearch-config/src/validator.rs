//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, EmbeddingBackend, StoreBackend};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn errors into [`ConfigError::Rejected`]; hand back the warnings otherwise.
    pub fn ensure_valid(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        Err(ConfigError::Rejected(
            self.errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect(),
        ))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Largest accepted result limit for either strategy.
const MAX_RESULT_LIMIT: usize = 200;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_search(config, &mut result);
        Self::validate_store(config, &mut result);
        Self::validate_extractor(config, &mut result);
        Self::validate_embedding(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_search(config: &Config, result: &mut ValidationResult) {
        let search = &config.search;

        for (path, value) in [
            ("search.max_price_tolerance", search.max_price_tolerance),
            ("search.min_price_tolerance", search.min_price_tolerance),
        ] {
            if !(0.0..1.0).contains(&value) {
                result.add_error(ValidationError::new(path, "tolerance must be in [0, 1)"));
            }
        }

        for (path, limit) in [
            ("search.structured_limit", search.structured_limit),
            ("search.semantic_limit", search.semantic_limit),
        ] {
            if limit == 0 {
                result.add_error(ValidationError::new(path, "limit must be greater than 0"));
            } else if limit > MAX_RESULT_LIMIT {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("limit is very high (>{MAX_RESULT_LIMIT}), summaries will be long"),
                ));
            }
        }

        if search.embedding_dimension != 384 {
            result.add_error(ValidationError::new(
                "search.embedding_dimension",
                "stored embeddings have 384 components",
            ));
        }

        if search.proximity_keywords.is_empty() && search.landmark_keywords.is_empty() {
            result.add_warning(ValidationWarning::new(
                "search",
                "no proximity or landmark keywords, filtered queries always run structured",
            ));
        }

        let blank = search
            .proximity_keywords
            .iter()
            .chain(search.landmark_keywords.iter())
            .any(|k| k.trim().is_empty());
        if blank {
            result.add_error(ValidationError::new(
                "search",
                "keywords cannot be blank, a blank keyword matches every query",
            ));
        }
    }

    fn validate_store(config: &Config, result: &mut ValidationResult) {
        if config.store.backend == StoreBackend::Memory {
            result.add_warning(ValidationWarning::new(
                "store.backend",
                "memory store starts empty and is lost on exit",
            ));
        }

        if config.store.backend == StoreBackend::Sqlite
            && config.store.path.as_os_str().is_empty()
        {
            result.add_error(ValidationError::new("store.path", "SQLite path cannot be empty"));
        }
    }

    fn validate_extractor(config: &Config, result: &mut ValidationResult) {
        let extractor = &config.extractor;
        if !extractor.enabled {
            return;
        }

        if !is_http_url(&extractor.base_url) {
            result.add_error(ValidationError::new(
                "extractor.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if !(0.0..=2.0).contains(&extractor.temperature) {
            result.add_error(ValidationError::new(
                "extractor.temperature",
                "temperature must be in [0, 2]",
            ));
        }

        if extractor.resolve_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "extractor.api_key",
                format!(
                    "API key is not set and {} is empty, queries will run without filters",
                    extractor.api_key_env
                ),
            ));
        }
    }

    fn validate_embedding(config: &Config, result: &mut ValidationResult) {
        let embedding = &config.embedding;

        if let Some(ref url) = embedding.base_url {
            if !is_http_url(url) {
                result.add_error(ValidationError::new(
                    "embedding.base_url",
                    "base_url must start with http:// or https://",
                ));
            }
        }

        match embedding.provider {
            EmbeddingBackend::Hash => result.add_warning(ValidationWarning::new(
                "embedding.provider",
                "hash embeddings are not semantic, ranking will be arbitrary",
            )),
            _ if embedding.resolve_api_key().is_none() => {
                result.add_warning(ValidationWarning::new(
                    "embedding.api_key",
                    format!(
                        "API key is not set and {} is empty, semantic queries will fail",
                        embedding.api_key_env
                    ),
                ))
            }
            _ => {}
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
