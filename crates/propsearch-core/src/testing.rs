//! Hand-written collaborators for engine and strategy tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use propsearch_protocols::{
    compare_by, matches_all, CityCount, Embedding, EmbeddingError, EmbeddingProvider,
    ExtractedFields, ExtractionError, FilterExtractor, PredicateQuery, PropertyRecord,
    PropertyStore, Readiness, ScoredRecord, StoreError, VectorQuery,
};

/// Store over a fixed record list, optionally failing every call.
pub struct StubStore {
    records: Vec<PropertyRecord>,
    fail: bool,
    pub last_query: Mutex<Option<PredicateQuery>>,
    pub last_vector_query: Mutex<Option<VectorQuery>>,
}

impl StubStore {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self {
            records,
            fail: false,
            last_query: Mutex::new(None),
            last_vector_query: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::ConnectionError("stub offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PropertyStore for StubStore {
    fn id(&self) -> &str {
        "stub"
    }

    async fn query(&self, query: PredicateQuery) -> Result<Vec<PropertyRecord>, StoreError> {
        *self.last_query.lock() = Some(query.clone());
        self.check()?;
        let mut hits: Vec<_> = self
            .records
            .iter()
            .filter(|r| matches_all(&query.constraints, r))
            .cloned()
            .collect();
        hits.sort_by(|a, b| compare_by(&query.order, a, b));
        hits.truncate(query.limit);
        Ok(hits)
    }

    async fn nearest(&self, query: VectorQuery) -> Result<Vec<ScoredRecord>, StoreError> {
        *self.last_vector_query.lock() = Some(query.clone());
        self.check()?;
        let probe = Embedding::new(query.vector.clone());
        let mut hits: Vec<_> = self
            .records
            .iter()
            .filter(|r| matches_all(&query.constraints, r))
            .map(|r| ScoredRecord {
                distance: r.embedding.as_deref().and_then(|e| probe.cosine_distance(e)),
                record: r.clone(),
            })
            .collect();
        hits.sort_by(|a, b| a.compare_distance(b));
        hits.truncate(query.limit);
        Ok(hits)
    }

    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>, StoreError> {
        self.check()?;
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    async fn cities(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn city_counts(&self) -> Result<Vec<CityCount>, StoreError> {
        self.check()?;
        Ok(Vec::new())
    }
}

/// Embedder returning a fixed vector.
pub struct StubEmbedder {
    vector: Option<Vec<f32>>,
    pub calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector: Some(vector),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            vector: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    fn id(&self) -> &str {
        "stub"
    }

    async fn embed(&self, _text: &str) -> Result<Embedding, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vector
            .clone()
            .map(Embedding::new)
            .ok_or_else(|| EmbeddingError::Failed("stub offline".to_string()))
    }

    fn dimension(&self) -> usize {
        self.vector.as_ref().map_or(0, Vec::len)
    }
}

/// Extractor returning fixed fields.
pub struct StubExtractor {
    fields: Option<ExtractedFields>,
}

impl StubExtractor {
    pub fn new(fields: ExtractedFields) -> Self {
        Self {
            fields: Some(fields),
        }
    }

    pub fn failing() -> Self {
        Self { fields: None }
    }
}

#[async_trait]
impl FilterExtractor for StubExtractor {
    fn id(&self) -> &str {
        "stub"
    }

    async fn extract(&self, _query: &str) -> Result<ExtractedFields, ExtractionError> {
        self.fields
            .clone()
            .ok_or_else(|| ExtractionError::Network("stub offline".to_string()))
    }
}

/// One-hot vector of the standard dimension.
pub fn unit_vector(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; propsearch_protocols::EMBEDDING_DIMENSION];
    v[axis] = 1.0;
    v
}

pub fn listing(
    id: &str,
    bhk: &str,
    price: f64,
    city: &str,
    locality: &str,
    readiness: Readiness,
) -> PropertyRecord {
    PropertyRecord::new(id, format!("Project {id}"))
        .with_bhk(bhk)
        .with_price(price)
        .with_location(city, locality)
        .with_readiness(readiness)
}
