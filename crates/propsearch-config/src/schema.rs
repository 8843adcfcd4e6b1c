//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Proximity phrases that steer a query toward semantic search.
pub const DEFAULT_PROXIMITY_KEYWORDS: &[&str] = &[
    "near",
    "close to",
    "around",
    "nearby",
    "vicinity",
    "walking distance",
    "next to",
    "adjacent",
];

/// Landmark words that steer a query toward semantic search.
pub const DEFAULT_LANDMARK_KEYWORDS: &[&str] = &[
    "park", "metro", "station", "airport", "mall", "school", "hospital", "tech", "hub", "plaza",
    "market",
];

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub extractor: ExtractorConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Search policy values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fraction added to a requested maximum price.
    #[serde(default = "default_max_price_tolerance")]
    pub max_price_tolerance: f64,

    /// Fraction removed from a requested minimum price.
    #[serde(default = "default_min_price_tolerance")]
    pub min_price_tolerance: f64,

    #[serde(default = "default_limit")]
    pub structured_limit: usize,

    #[serde(default = "default_limit")]
    pub semantic_limit: usize,

    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,

    #[serde(default = "default_proximity_keywords")]
    pub proximity_keywords: Vec<String>,

    #[serde(default = "default_landmark_keywords")]
    pub landmark_keywords: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_price_tolerance: default_max_price_tolerance(),
            min_price_tolerance: default_min_price_tolerance(),
            structured_limit: default_limit(),
            semantic_limit: default_limit(),
            embedding_dimension: default_embedding_dimension(),
            proximity_keywords: default_proximity_keywords(),
            landmark_keywords: default_landmark_keywords(),
        }
    }
}

fn default_max_price_tolerance() -> f64 {
    0.10
}

fn default_min_price_tolerance() -> f64 {
    0.05
}

fn default_limit() -> usize {
    20
}

fn default_embedding_dimension() -> usize {
    384
}

fn default_proximity_keywords() -> Vec<String> {
    DEFAULT_PROXIMITY_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

fn default_landmark_keywords() -> Vec<String> {
    DEFAULT_LANDMARK_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

/// Property store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

/// Property store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: StoreBackend,

    /// SQLite database file, or JSON seed file for the memory backend.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
        }
    }
}

fn default_store_backend() -> StoreBackend {
    StoreBackend::Sqlite
}

fn default_store_path() -> PathBuf {
    propsearch_dir().join("properties.db")
}

/// LLM filter extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// When false, every query runs with empty filters.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// OpenAI-compatible API base URL.
    #[serde(default = "default_extractor_base_url")]
    pub base_url: String,

    #[serde(default = "default_extractor_model")]
    pub model: String,

    #[serde(default = "default_extractor_temperature")]
    pub temperature: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable consulted when `api_key` is unset.
    #[serde(default = "default_extractor_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_extractor_base_url(),
            model: default_extractor_model(),
            temperature: default_extractor_temperature(),
            api_key: None,
            api_key_env: default_extractor_key_env(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ExtractorConfig {
    /// Explicit key, else the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

fn default_extractor_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_extractor_model() -> String {
    "openai/gpt-oss-120b".to_string()
}

fn default_extractor_temperature() -> f32 {
    0.1
}

fn default_extractor_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

/// Embedding provider backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Hugging Face inference API.
    HuggingFace,
    /// OpenAI-compatible `/embeddings` endpoint.
    OpenAI,
    /// Local feature hashing; not semantic, for offline use only.
    Hash,
}

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_backend")]
    pub provider: EmbeddingBackend,

    /// Overrides the provider's default endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_embedding_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_backend(),
            base_url: None,
            model: default_embedding_model(),
            api_key: None,
            api_key_env: default_embedding_key_env(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl EmbeddingConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

fn default_embedding_backend() -> EmbeddingBackend {
    EmbeddingBackend::HuggingFace
}

fn default_embedding_model() -> String {
    "BAAI/bge-small-en-v1.5".to_string()
}

fn default_embedding_key_env() -> String {
    "HF_API_KEY".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rotated log files.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Write log files in addition to the console.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
            file: default_true(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    propsearch_dir().join("logs")
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn resolve_key(explicit: Option<&str>, env_var: &str) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|key| !key.trim().is_empty())
}

/// Base directory for propsearch state (`~/.propsearch`).
pub fn propsearch_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".propsearch")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
