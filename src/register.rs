//! Collaborator construction from configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use propsearch_config::{
    Config, EmbeddingBackend, EmbeddingConfig, ExtractorConfig, SearchConfig, StoreBackend,
    StoreConfig,
};
use propsearch_core::{SearchEngine, SearchPolicy};
use propsearch_embedding_http::{
    HashEmbedding, HuggingFaceConfig, HuggingFaceEmbedding, OpenAIEmbedding,
    OpenAIEmbeddingConfig,
};
use propsearch_extractor_llm::{DisabledExtractor, LlmExtractorConfig, LlmFilterExtractor};
use propsearch_protocols::{
    EmbeddingProvider, FilterExtractor, PropertyRecord, PropertyStore, StoreError,
};
use propsearch_store_memory::InMemoryPropertyStore;
use propsearch_store_sqlite::SqlitePropertyStore;

/// The configured store, keeping the concrete type for writes.
pub(crate) enum StoreHandle {
    Sqlite(Arc<SqlitePropertyStore>),
    Memory {
        store: Arc<InMemoryPropertyStore>,
        seed: PathBuf,
    },
}

impl StoreHandle {
    pub(crate) fn as_store(&self) -> Arc<dyn PropertyStore> {
        match self {
            Self::Sqlite(store) => store.clone(),
            Self::Memory { store, .. } => store.clone(),
        }
    }

    /// Upsert records. The memory backend writes the merged set back to its seed file.
    pub(crate) async fn import(&self, records: Vec<PropertyRecord>) -> Result<usize, StoreError> {
        match self {
            Self::Sqlite(store) => store.upsert_many(records).await,
            Self::Memory { store, seed } => {
                let count = store.upsert_many(records)?;
                store.save_json_file(seed)?;
                info!("Memory store saved to {}", seed.display());
                Ok(count)
            }
        }
    }
}

/// Open the configured store.
///
/// For the memory backend `path` names an optional JSON seed file.
pub(crate) async fn build_store(config: &StoreConfig) -> Result<StoreHandle, StoreError> {
    match config.backend {
        StoreBackend::Sqlite => {
            let store = SqlitePropertyStore::open(&config.path).await?;
            info!("SQLite store opened at {}", config.path.display());
            Ok(StoreHandle::Sqlite(Arc::new(store)))
        }
        StoreBackend::Memory => {
            let store = if config.path.is_file() {
                InMemoryPropertyStore::from_json_file(&config.path)?
            } else {
                warn!(
                    "Seed file {} not found, starting with an empty memory store",
                    config.path.display()
                );
                InMemoryPropertyStore::new()
            };
            info!("Memory store ready with {} records", store.len());
            Ok(StoreHandle::Memory {
                store: Arc::new(store),
                seed: config.path.clone(),
            })
        }
    }
}

pub(crate) fn build_embedder(config: &EmbeddingConfig) -> Arc<dyn EmbeddingProvider> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let api_key = config.resolve_api_key();
    if api_key.is_none() && config.provider != EmbeddingBackend::Hash {
        warn!(
            "No embedding API key (set {}); semantic searches will fail",
            config.api_key_env
        );
    }

    let embedder: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingBackend::HuggingFace => {
            let mut hf = HuggingFaceConfig::new(api_key)
                .with_model(config.model.clone())
                .with_timeout(timeout);
            if let Some(url) = &config.base_url {
                hf = hf.with_base_url(url.clone());
            }
            Arc::new(HuggingFaceEmbedding::new(hf))
        }
        EmbeddingBackend::OpenAI => {
            let mut openai = OpenAIEmbeddingConfig::new(api_key)
                .with_model(config.model.clone())
                .with_timeout(timeout);
            if let Some(url) = &config.base_url {
                openai = openai.with_base_url(url.clone());
            }
            Arc::new(OpenAIEmbedding::new(openai))
        }
        EmbeddingBackend::Hash => {
            warn!("Hash embedding is not semantic; use it for offline testing only");
            Arc::new(HashEmbedding::default())
        }
    };
    info!("Embedding provider: {}", embedder.id());
    embedder
}

pub(crate) fn build_extractor(config: &ExtractorConfig) -> Arc<dyn FilterExtractor> {
    if !config.enabled {
        info!("Filter extraction disabled; every query runs semantic search");
        return Arc::new(DisabledExtractor);
    }

    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "No extractor API key (set {}); queries will run without filters",
            config.api_key_env
        );
    }

    let llm = LlmExtractorConfig::new(api_key)
        .with_base_url(config.base_url.clone())
        .with_model(config.model.clone())
        .with_temperature(config.temperature)
        .with_timeout(Duration::from_secs(config.timeout_seconds));
    Arc::new(LlmFilterExtractor::new(llm))
}

pub(crate) fn search_policy(config: &SearchConfig) -> SearchPolicy {
    SearchPolicy {
        max_price_tolerance: config.max_price_tolerance,
        min_price_tolerance: config.min_price_tolerance,
        structured_limit: config.structured_limit,
        semantic_limit: config.semantic_limit,
        embedding_dimension: config.embedding_dimension,
        ..SearchPolicy::default()
    }
    .with_keywords(&config.proximity_keywords, &config.landmark_keywords)
}

/// Build the engine and hand back the store for direct writes.
pub(crate) async fn build_engine(
    config: &Config,
) -> Result<(SearchEngine, StoreHandle), StoreError> {
    let store = build_store(&config.store).await?;
    let engine = SearchEngine::with_policy(
        build_extractor(&config.extractor),
        build_embedder(&config.embedding),
        store.as_store(),
        search_policy(&config.search),
    );
    Ok((engine, store))
}
