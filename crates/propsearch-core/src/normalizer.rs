//! Canonicalization of raw extractor output.

use propsearch_protocols::{
    BhkPattern, ExtractedFields, ParsedFilters, ProjectCategory, ProjectType, Readiness,
};

/// Configuration label used for every office alias.
pub const OFFICE_LABEL: &str = "Office";

/// Turns loosely typed extractor output into [`ParsedFilters`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterNormalizer;

impl FilterNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize every field independently. Unusable values become absent.
    pub fn normalize(&self, fields: ExtractedFields) -> ParsedFilters {
        ParsedFilters {
            city: clean_text(fields.city),
            locality: clean_text(fields.locality),
            bhk: clean_text(fields.bhk).map(normalize_configuration),
            min_price: fields.min_price.and_then(clean_amount),
            max_price: fields.max_price.and_then(clean_amount),
            readiness: clean_text(fields.readiness).and_then(parse_readiness),
            project_name: clean_text(fields.project_name),
            project_type: clean_text(fields.project_type).and_then(parse_project_type),
            project_category: clean_text(fields.project_category)
                .and_then(parse_project_category),
        }
    }
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn normalize_configuration(bhk: String) -> String {
    match BhkPattern::parse(&bhk) {
        BhkPattern::Office => OFFICE_LABEL.to_string(),
        BhkPattern::Exact(_) => bhk,
    }
}

fn clean_amount(amount: f64) -> Option<f64> {
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

fn parse_readiness(value: String) -> Option<Readiness> {
    match value.to_lowercase().as_str() {
        "ready to move" => Some(Readiness::ReadyToMove),
        "under construction" => Some(Readiness::UnderConstruction),
        _ => None,
    }
}

fn parse_project_type(value: String) -> Option<ProjectType> {
    match value.to_uppercase().as_str() {
        "RESIDENTIAL" => Some(ProjectType::Residential),
        "COMMERCIAL" => Some(ProjectType::Commercial),
        "BOTH" => Some(ProjectType::Both),
        _ => None,
    }
}

fn parse_project_category(value: String) -> Option<ProjectCategory> {
    match value.to_uppercase().as_str() {
        "TOWNSHIP" => Some(ProjectCategory::Township),
        "STANDALONE" => Some(ProjectCategory::Standalone),
        "COMPLEX" => Some(ProjectCategory::Complex),
        _ => None,
    }
}
