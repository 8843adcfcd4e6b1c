//! Filter extraction errors.

use thiserror::Error;

/// Failure of the filter extractor. Always recoverable: the engine falls
/// back to an all-absent filter set.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extractor not configured: {0}")]
    NotConfigured(String),

    #[error("Extractor request failed: {0}")]
    Network(String),

    #[error("Extractor API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Malformed extractor output: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_display() {
        let err = ExtractionError::NotConfigured("GROQ_API_KEY".to_string());
        assert!(err.to_string().contains("not configured"));
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ExtractionError::ApiError {
            status: 429,
            message: "rate limited".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("429"));
        assert!(display.contains("rate limited"));
    }

    #[test]
    fn test_malformed_display() {
        let err = ExtractionError::Malformed("expected object".to_string());
        assert!(err.to_string().contains("Malformed"));
    }
}
