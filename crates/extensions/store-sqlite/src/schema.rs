//! Database schema management.

use rusqlite::Connection;
use tokio_rusqlite::Error;

/// Initialize the database schema.
pub fn init_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

const SCHEMA: &str = r#"
-- Listings; rowid order is insertion order.
-- *_lower columns hold Unicode lowercase computed on write.
CREATE TABLE IF NOT EXISTS properties (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    name_lower TEXT NOT NULL,
    status TEXT,
    bhk TEXT,
    bhk_normalized TEXT,
    base_price REAL,
    city TEXT,
    city_lower TEXT,
    locality TEXT,
    locality_lower TEXT,
    readiness TEXT NOT NULL DEFAULT 'Unknown',
    carpet_area REAL,
    amenities TEXT NOT NULL DEFAULT '[]',
    address TEXT,
    summary TEXT,
    slug TEXT,
    possession TEXT,
    project_type TEXT,
    project_category TEXT,
    embedding BLOB,
    created_at TEXT,
    updated_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_properties_city ON properties(city_lower);
CREATE INDEX IF NOT EXISTS idx_properties_bhk ON properties(bhk_normalized);
CREATE INDEX IF NOT EXISTS idx_properties_price ON properties(base_price);
CREATE INDEX IF NOT EXISTS idx_properties_readiness ON properties(readiness);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='properties'")
            .unwrap();
        assert!(stmt.exists([]).unwrap());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }
}
