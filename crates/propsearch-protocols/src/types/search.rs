//! Request and response shapes of a search.

use serde::{Deserialize, Serialize};

/// Retrieval strategy chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Structured,
    Semantic,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured => f.write_str("structured"),
            Self::Semantic => f.write_str("semantic"),
        }
    }
}

/// Display projection of a property record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCard {
    pub title: String,
    pub city_locality: String,
    pub bhk: String,
    pub price: String,
    pub project_name: String,
    pub possession_status: String,
    pub amenities: Vec<String>,
    pub cta_url: String,
}

/// Incoming search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Outgoing search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub summary: String,
    pub properties: Vec<PropertyCard>,
    pub mode: SearchMode,
    /// True when an upstream failure reduced the answer (empty filters or empty results).
    pub degraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_form() {
        assert_eq!(serde_json::to_string(&SearchMode::Semantic).unwrap(), "\"semantic\"");
        assert_eq!(SearchMode::Structured.to_string(), "structured");
    }

    #[test]
    fn test_card_camel_case() {
        let card = PropertyCard {
            title: "2BHK Flat in Baner".to_string(),
            city_locality: "Pune, Baner".to_string(),
            bhk: "2BHK".to_string(),
            price: "₹54.00 L".to_string(),
            project_name: "Skyline".to_string(),
            possession_status: "Ready to Move".to_string(),
            amenities: vec!["Gym".to_string()],
            cta_url: "/project/p1".to_string(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["cityLocality"], "Pune, Baner");
        assert_eq!(json["ctaUrl"], "/project/p1");
        assert_eq!(json["possessionStatus"], "Ready to Move");
    }

    #[test]
    fn test_request_missing_query_defaults_empty() {
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_empty());
    }
}
