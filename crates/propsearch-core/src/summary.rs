//! Natural-language summaries of search results.
//!
//! A summary is an ordered list of clauses, each built from [`SummaryStats`]
//! and the filters, joined by single spaces. A builder returns `None` rather
//! than an empty clause.

use propsearch_protocols::{
    ParsedFilters, PropertyRecord, Readiness, UNKNOWN_BHK, UNKNOWN_CITY, UNKNOWN_LOCALITY,
};

use crate::formatter::format_price;

/// Amenity list too generic to be worth mentioning.
const GENERIC_AMENITIES: [&str; 3] = ["Gym", "Pool", "Parking"];

/// Average price below this fraction of the budget counts as "well within".
const WITHIN_BUDGET_RATIO: f64 = 0.8;

/// Price aggregates over records that have a price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Aggregates of a result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    /// Distinct configurations in first-seen order.
    pub bhks: Vec<String>,
    pub localities: Vec<String>,
    pub cities: Vec<String>,
    pub prices: Option<PriceStats>,
    pub ready_to_move: usize,
    pub under_construction: usize,
    /// Distinct amenities in first-seen order.
    pub amenities: Vec<String>,
}

impl SummaryStats {
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        let mut stats = Self {
            count: records.len(),
            ..Default::default()
        };

        for record in records {
            push_known(&mut stats.bhks, record.bhk.as_deref(), UNKNOWN_BHK);
            push_known(&mut stats.localities, record.locality.as_deref(), UNKNOWN_LOCALITY);
            push_known(&mut stats.cities, record.city.as_deref(), UNKNOWN_CITY);
            match record.readiness {
                Readiness::ReadyToMove => stats.ready_to_move += 1,
                Readiness::UnderConstruction => stats.under_construction += 1,
                Readiness::Unknown => {}
            }
            for amenity in &record.amenities {
                if !stats.amenities.contains(amenity) {
                    stats.amenities.push(amenity.clone());
                }
            }
        }

        let prices: Vec<f64> = records.iter().filter_map(|r| r.base_price).collect();
        if !prices.is_empty() {
            stats.prices = Some(PriceStats {
                min: prices.iter().copied().fold(f64::INFINITY, f64::min),
                max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                average: prices.iter().sum::<f64>() / prices.len() as f64,
            });
        }

        stats
    }
}

fn push_known(values: &mut Vec<String>, value: Option<&str>, placeholder: &str) {
    if let Some(value) = value {
        if value != placeholder && !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
}

/// Composes result summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryGenerator;

impl SummaryGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, filters: &ParsedFilters, records: &[PropertyRecord]) -> String {
        if records.is_empty() {
            return no_results(filters);
        }

        let stats = SummaryStats::from_records(records);
        [
            Some(opener(stats.count)),
            location_clause(&stats),
            price_clause(filters, &stats),
            readiness_clause(&stats),
            amenities_clause(&stats),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

fn no_results(filters: &ParsedFilters) -> String {
    let mut parts =
        vec!["I couldn't find any properties that match all your criteria.".to_string()];

    let criteria = criteria(filters);
    if !criteria.is_empty() {
        parts.push(format!("Looking for: {}.", criteria.join(", ")));
    }

    let suggestions = suggestions(filters);
    if suggestions.is_empty() {
        parts.push("Try adjusting your search filters or try a different area.".to_string());
    } else {
        parts.push(format!("Try {}.", suggestions.join(" or ")));
    }

    parts.join(" ")
}

fn criteria(filters: &ParsedFilters) -> Vec<String> {
    let mut criteria = Vec::new();
    if let Some(ref bhk) = filters.bhk {
        criteria.push(bhk.clone());
    }
    if let Some(max_price) = filters.max_price {
        criteria.push(format!("under {}", format_price(max_price)));
    }
    if let Some(min_price) = filters.min_price {
        criteria.push(format!("above {}", format_price(min_price)));
    }
    if let Some(place) = filters.locality.as_ref().or(filters.city.as_ref()) {
        criteria.push(format!("in {place}"));
    }
    if let Some(readiness) = filters.readiness {
        criteria.push(readiness.label().to_lowercase());
    }
    if let Some(ref name) = filters.project_name {
        criteria.push(format!("project {name}"));
    }
    criteria
}

/// At most two, in priority order.
fn suggestions(filters: &ParsedFilters) -> Vec<String> {
    let mut suggestions = Vec::new();
    if filters.max_price.is_some() {
        suggestions.push("increasing your budget".to_string());
    }
    if filters.locality.is_some() {
        let city = filters.city.as_deref().unwrap_or("the city");
        suggestions.push(format!("expanding to other areas in {city}"));
    }
    if filters.bhk.is_some() {
        suggestions.push("considering different configurations".to_string());
    }
    suggestions.truncate(2);
    suggestions
}

fn opener(count: usize) -> String {
    match count {
        1 => "I found 1 property that matches your search.".to_string(),
        2..=5 => format!("Great news! I found {count} properties for you."),
        6..=15 => format!("I found {count} excellent options matching your criteria."),
        _ => format!("I found {count} properties for you. Showing the top matches."),
    }
}

fn location_clause(stats: &SummaryStats) -> Option<String> {
    match stats.bhks.as_slice() {
        [] => None,
        [bhk] => {
            if stats.localities.is_empty() {
                return None;
            }
            let localities = take_joined(&stats.localities, 3, ", ");
            let more = if stats.localities.len() > 3 {
                " and other nearby areas"
            } else {
                ""
            };
            let city = stats
                .cities
                .first()
                .map(|c| format!(", {c}"))
                .unwrap_or_default();
            Some(format!(
                "These {bhk} properties are primarily located in {localities}{more}{city}."
            ))
        }
        bhks => {
            let configurations = take_joined(bhks, 3, ", ");
            let across = if stats.localities.is_empty() {
                String::new()
            } else {
                format!(" across {}", take_joined(&stats.localities, 2, " and "))
            };
            Some(format!("Options include {configurations} configurations{across}."))
        }
    }
}

fn price_clause(filters: &ParsedFilters, stats: &SummaryStats) -> Option<String> {
    let prices = stats.prices?;
    let within_budget = filters
        .max_price
        .filter(|budget| *budget > 0.0)
        .is_some_and(|budget| prices.average < budget * WITHIN_BUDGET_RATIO);

    if within_budget {
        Some(format!(
            "Most properties are well within your budget, ranging from {} to {}.",
            format_price(prices.min),
            format_price(prices.max)
        ))
    } else {
        Some(format!(
            "Prices range from {} to {}, averaging around {}.",
            format_price(prices.min),
            format_price(prices.max),
            format_price(prices.average)
        ))
    }
}

fn readiness_clause(stats: &SummaryStats) -> Option<String> {
    let ready = stats.ready_to_move;
    let building = stats.under_construction;

    if ready > 0 && building > 0 {
        Some(format!(
            "{ready} {} ready-to-move, while {building} {} under construction.",
            verb(ready),
            verb(building)
        ))
    } else if ready == stats.count {
        Some("All properties are ready for immediate possession.".to_string())
    } else if building == stats.count {
        Some("These are upcoming projects currently under construction.".to_string())
    } else {
        None
    }
}

fn verb(count: usize) -> &'static str {
    if count == 1 { "is" } else { "are" }
}

fn amenities_clause(stats: &SummaryStats) -> Option<String> {
    let common: Vec<&str> = stats.amenities.iter().take(3).map(String::as_str).collect();
    if common.is_empty() || is_generic(&common) {
        return None;
    }
    Some(format!("Common amenities include {}.", common.join(", ")))
}

fn is_generic(amenities: &[&str]) -> bool {
    amenities.len() == GENERIC_AMENITIES.len()
        && GENERIC_AMENITIES.iter().all(|g| amenities.contains(g))
}

fn take_joined(values: &[String], n: usize, separator: &str) -> String {
    values
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
