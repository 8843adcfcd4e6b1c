//! Bulk import of property records.

use std::path::Path;

use tracing::{info, warn};

use propsearch_config::{Config, StoreBackend};
use propsearch_protocols::PropertyRecord;

use crate::register::build_store;

/// Load a JSON array of records from `file` into the configured store.
pub(crate) async fn run_import(
    config: Config,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let records: Vec<PropertyRecord> = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid property JSON in {}: {}", file.display(), e))?;

    let embedded = records.iter().filter(|r| r.embedding.is_some()).count();
    if embedded < records.len() {
        warn!(
            "{} of {} records have no embedding and will rank last in semantic search",
            records.len() - embedded,
            records.len()
        );
    }

    if config.store.backend == StoreBackend::Memory {
        info!("Memory backend: records are merged into {}", config.store.path.display());
    }

    let store = build_store(&config.store).await?;
    let written = store.import(records).await?;
    info!("Imported {} records from {}", written, file.display());
    println!("Imported {} records", written);
    Ok(())
}
