//! Search filters.

use serde::{Deserialize, Serialize};

use super::property::Readiness;

/// Project type of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectType {
    Residential,
    Commercial,
    Both,
}

/// Project category of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectCategory {
    Township,
    Standalone,
    Complex,
}

/// Canonical filter bag. `None` means the attribute is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bhk: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness: Option<Readiness>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_category: Option<ProjectCategory>,
}

impl ParsedFilters {
    /// Whether any attribute usable as a structural predicate is present.
    pub fn has_structural_fields(&self) -> bool {
        self.city.is_some()
            || self.locality.is_some()
            || self.bhk.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.project_name.is_some()
    }

    /// Whether every attribute is absent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Raw, loosely typed extractor output prior to normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    pub city: Option<String>,
    pub locality: Option<String>,
    pub bhk: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub readiness: Option<String>,
    pub project_name: Option<String>,
    pub project_type: Option<String>,
    pub project_category: Option<String>,
}
