//! Filter extractor contract.

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::types::ExtractedFields;

/// Turns a free-text query into raw filter fields.
///
/// Implementations report failure through [`ExtractionError`]; callers
/// treat any error as "nothing extracted".
#[async_trait]
pub trait FilterExtractor: Send + Sync {
    /// Extractor identifier used in logs.
    fn id(&self) -> &str;

    /// Extract filter fields from the query text.
    async fn extract(&self, query: &str) -> Result<ExtractedFields, ExtractionError>;
}
