//! Property records as held by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder city written by ingestion when the source row had none.
pub const UNKNOWN_CITY: &str = "Unknown City";

/// Placeholder locality written by ingestion when the source row had none.
pub const UNKNOWN_LOCALITY: &str = "Unknown Locality";

/// Placeholder configuration label.
pub const UNKNOWN_BHK: &str = "N/A";

/// Possession status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Readiness {
    #[serde(rename = "Ready to Move")]
    ReadyToMove,
    #[serde(rename = "Under Construction")]
    UnderConstruction,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Readiness {
    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ReadyToMove => "Ready to Move",
            Self::UnderConstruction => "Under Construction",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a label exactly as stored. Anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Ready to Move" => Self::ReadyToMove,
            "Under Construction" => Self::UnderConstruction,
            _ => Self::Unknown,
        }
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,

    pub name: String,

    /// Project status as published by the developer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Configuration code, e.g. "2BHK" or "Office space".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bhk: Option<String>,

    /// Price in base currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(default)]
    pub readiness: Readiness,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carpet_area: Option<f64>,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub possession: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_category: Option<String>,

    /// Document embedding; exactly [`crate::EMBEDDING_DIMENSION`] components when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PropertyRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            bhk: None,
            base_price: None,
            city: None,
            locality: None,
            readiness: Readiness::Unknown,
            carpet_area: None,
            amenities: Vec::new(),
            address: None,
            summary: None,
            slug: None,
            possession: None,
            project_type: None,
            project_category: None,
            embedding: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn with_bhk(mut self, bhk: impl Into<String>) -> Self {
        self.bhk = Some(bhk.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.base_price = Some(price);
        self
    }

    pub fn with_location(mut self, city: impl Into<String>, locality: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.locality = Some(locality.into());
        self
    }

    pub fn with_readiness(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

#[cfg(test)]
#[path = "property_tests.rs"]
mod tests;
