//! In-memory property store implementation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use propsearch_protocols::{
    compare_by, cosine_similarity, matches_all, validate_record, CityCount, PredicateQuery,
    PropertyRecord, PropertyStore, ScoredRecord, StoreError, VectorQuery, UNKNOWN_CITY,
};

/// Property store backed by a vector in insertion order.
pub struct InMemoryPropertyStore {
    id: String,
    records: RwLock<Vec<PropertyRecord>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self {
            id: "memory".to_string(),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Build a store from records, validating each one.
    pub fn from_records(records: Vec<PropertyRecord>) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.upsert(record)?;
        }
        Ok(store)
    }

    /// Load a JSON array of records.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::StorageError(format!("{}: {e}", path.display())))?;
        let records: Vec<PropertyRecord> = serde_json::from_str(&content)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        debug!("Loaded {} records from {}", records.len(), path.display());
        Self::from_records(records)
    }

    /// Insert a record, or replace the one with the same ID in place.
    pub fn upsert(&self, record: PropertyRecord) -> Result<(), StoreError> {
        validate_record(&record)?;

        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    /// Upsert records. Nothing is written if any record is invalid.
    pub fn upsert_many(&self, records: Vec<PropertyRecord>) -> Result<usize, StoreError> {
        for record in &records {
            validate_record(record)?;
        }
        let count = records.len();
        let mut stored = self.records.write();
        for record in records {
            match stored.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => stored.push(record),
            }
        }
        Ok(count)
    }

    /// Write every record, in insertion order, as a JSON array.
    pub fn save_json_file(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::StorageError(format!("{}: {e}", parent.display())))?;
        }
        let file = File::create(path)
            .map_err(|e| StoreError::StorageError(format!("{}: {e}", path.display())))?;

        let records = self.records.read();
        serde_json::to_writer_pretty(BufWriter::new(file), &*records)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        debug!("Saved {} records to {}", records.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for InMemoryPropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn known_city(record: &PropertyRecord) -> Option<&str> {
    record.city.as_deref().filter(|c| *c != UNKNOWN_CITY)
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    fn id(&self) -> &str {
        &self.id
    }

    async fn query(&self, query: PredicateQuery) -> Result<Vec<PropertyRecord>, StoreError> {
        let records = self.records.read();
        let mut hits: Vec<PropertyRecord> = records
            .iter()
            .filter(|r| matches_all(&query.constraints, r))
            .cloned()
            .collect();

        // Stable sort keeps insertion order among ties.
        hits.sort_by(|a, b| compare_by(&query.order, a, b));
        hits.truncate(query.limit);
        Ok(hits)
    }

    async fn nearest(&self, query: VectorQuery) -> Result<Vec<ScoredRecord>, StoreError> {
        let records = self.records.read();
        let mut hits: Vec<ScoredRecord> = records
            .iter()
            .filter(|r| matches_all(&query.constraints, r))
            .map(|r| ScoredRecord {
                distance: r
                    .embedding
                    .as_deref()
                    .and_then(|e| cosine_similarity(&query.vector, e))
                    .map(|sim| 1.0 - sim),
                record: r.clone(),
            })
            .collect();

        hits.sort_by(ScoredRecord::compare_distance);
        hits.truncate(query.limit);
        Ok(hits)
    }

    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>, StoreError> {
        Ok(self.records.read().iter().find(|r| r.id == id).cloned())
    }

    async fn cities(&self) -> Result<Vec<String>, StoreError> {
        let records = self.records.read();
        let mut cities: Vec<String> = records
            .iter()
            .filter_map(known_city)
            .map(str::to_string)
            .collect();
        cities.sort();
        cities.dedup();
        Ok(cities)
    }

    async fn city_counts(&self) -> Result<Vec<CityCount>, StoreError> {
        let records = self.records.read();
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for city in records.iter().filter_map(known_city) {
            *counts.entry(city).or_default() += 1;
        }

        let mut counts: Vec<CityCount> = counts
            .into_iter()
            .map(|(city, count)| CityCount {
                city: city.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| match b.count.cmp(&a.count) {
            Ordering::Equal => a.city.cmp(&b.city),
            other => other,
        });
        Ok(counts)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
