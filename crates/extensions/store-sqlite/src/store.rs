//! SQLite property store implementation.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, params_from_iter, OptionalExtension};
use tokio_rusqlite::Connection;
use tracing::debug;

use propsearch_protocols::{
    cosine_similarity, normalize_bhk, validate_record, CityCount, PredicateQuery, PropertyRecord,
    PropertyStore, ScoredRecord, StoreError, VectorQuery, UNKNOWN_CITY,
};

use crate::codec::{encode_amenities, encode_embedding};
use crate::schema::init_schema;
use crate::sql::{build_filter, build_order, row_to_record, COLUMNS};

const UPSERT_SQL: &str = "INSERT INTO properties (id, name, name_lower, status, bhk, \
     bhk_normalized, base_price, city, city_lower, locality, locality_lower, readiness, \
     carpet_area, amenities, address, summary, slug, possession, project_type, project_category, \
     embedding, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
             ?19, ?20, ?21, ?22, ?23)
     ON CONFLICT(id) DO UPDATE SET
        name = excluded.name, name_lower = excluded.name_lower, status = excluded.status,
        bhk = excluded.bhk, bhk_normalized = excluded.bhk_normalized,
        base_price = excluded.base_price, city = excluded.city,
        city_lower = excluded.city_lower, locality = excluded.locality,
        locality_lower = excluded.locality_lower, readiness = excluded.readiness,
        carpet_area = excluded.carpet_area, amenities = excluded.amenities,
        address = excluded.address, summary = excluded.summary, slug = excluded.slug,
        possession = excluded.possession, project_type = excluded.project_type,
        project_category = excluded.project_category, embedding = excluded.embedding,
        updated_at = excluded.updated_at";

/// SQLite-based property store.
pub struct SqlitePropertyStore {
    conn: Connection,
}

impl SqlitePropertyStore {
    /// Create a new in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        Self::with_connection(conn).await
    }

    /// Open or create a file-backed database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConnectionError(format!("{}: {e}", parent.display())))?;
        }
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        Self::with_connection(conn).await
    }

    async fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| Ok(init_schema(conn)?))
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Insert a record, or update the one with the same ID keeping its position.
    pub async fn upsert(&self, record: PropertyRecord) -> Result<(), StoreError> {
        self.upsert_many(vec![record]).await.map(|_| ())
    }

    /// Upsert records in one transaction. Nothing is written if any record is invalid.
    pub async fn upsert_many(&self, records: Vec<PropertyRecord>) -> Result<usize, StoreError> {
        for record in &records {
            validate_record(record)?;
        }

        let now = Utc::now().to_rfc3339();
        let written = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(UPSERT_SQL)?;
                    for record in &records {
                        let created = record
                            .created_at
                            .map(|t| t.to_rfc3339())
                            .unwrap_or_else(|| now.clone());
                        stmt.execute(params![
                            record.id,
                            record.name,
                            record.name.to_lowercase(),
                            record.status,
                            record.bhk,
                            record.bhk.as_deref().map(normalize_bhk),
                            record.base_price,
                            record.city,
                            record.city.as_deref().map(str::to_lowercase),
                            record.locality,
                            record.locality.as_deref().map(str::to_lowercase),
                            record.readiness.label(),
                            record.carpet_area,
                            encode_amenities(&record.amenities),
                            record.address,
                            record.summary,
                            record.slug,
                            record.possession,
                            record.project_type,
                            record.project_category,
                            record.embedding.as_deref().map(encode_embedding),
                            created,
                            now,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(records.len())
            })
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        debug!("Upserted {} properties", written);
        Ok(written)
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<u64, StoreError> {
        self.conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM properties", [], |row| row.get(0))?;
                Ok(count.max(0) as u64)
            })
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))
    }
}

#[async_trait]
impl PropertyStore for SqlitePropertyStore {
    fn id(&self) -> &str {
        "sqlite"
    }

    async fn query(&self, query: PredicateQuery) -> Result<Vec<PropertyRecord>, StoreError> {
        let filter = build_filter(&query.constraints);
        let sql = format!(
            "SELECT {COLUMNS} FROM properties WHERE {} ORDER BY {} LIMIT {}",
            filter.clause,
            build_order(&query.order),
            query.limit
        );

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let records = stmt
                    .query_map(params_from_iter(filter.params), row_to_record)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(records)
            })
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))
    }

    async fn nearest(&self, query: VectorQuery) -> Result<Vec<ScoredRecord>, StoreError> {
        let filter = build_filter(&query.constraints);
        let sql = format!(
            "SELECT {COLUMNS} FROM properties WHERE {} ORDER BY rowid ASC",
            filter.clause
        );

        let records = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let records = stmt
                    .query_map(params_from_iter(filter.params), row_to_record)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(records)
            })
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        let mut scored: Vec<ScoredRecord> = records
            .into_iter()
            .map(|record| ScoredRecord {
                distance: record
                    .embedding
                    .as_deref()
                    .and_then(|e| cosine_similarity(&query.vector, e))
                    .map(|sim| 1.0 - sim),
                record,
            })
            .collect();
        scored.sort_by(ScoredRecord::compare_distance);
        scored.truncate(query.limit);
        Ok(scored)
    }

    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>, StoreError> {
        let id = id.to_string();
        self.conn
            .call(move |conn| {
                let sql = format!("SELECT {COLUMNS} FROM properties WHERE id = ?1");
                let record = conn.query_row(&sql, [&id], row_to_record).optional()?;
                Ok(record)
            })
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))
    }

    async fn cities(&self) -> Result<Vec<String>, StoreError> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT DISTINCT city FROM properties
                     WHERE city IS NOT NULL AND city != ?1
                     ORDER BY city ASC",
                )?;
                let cities = stmt
                    .query_map([UNKNOWN_CITY], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(cities)
            })
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))
    }

    async fn city_counts(&self) -> Result<Vec<CityCount>, StoreError> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT city, COUNT(*) AS n FROM properties
                     WHERE city IS NOT NULL AND city != ?1
                     GROUP BY city
                     ORDER BY n DESC, city ASC",
                )?;
                let counts = stmt
                    .query_map([UNKNOWN_CITY], |row| {
                        let count: i64 = row.get(1)?;
                        Ok(CityCount {
                            city: row.get(0)?,
                            count: count.max(0) as u64,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(counts)
            })
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
