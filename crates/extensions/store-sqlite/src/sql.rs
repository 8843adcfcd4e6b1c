//! Translation of the query vocabulary into SQL.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::Row;

use propsearch_protocols::{Constraint, PropertyRecord, Readiness, SortKey};

use crate::codec::{decode_amenities, decode_embedding};

pub(crate) const COLUMNS: &str = "id, name, status, bhk, base_price, city, locality, readiness, \
     carpet_area, amenities, address, summary, slug, possession, project_type, \
     project_category, embedding, created_at, updated_at";

/// A `WHERE` clause with its positional parameters.
#[derive(Debug, Default)]
pub(crate) struct Filter {
    pub clause: String,
    pub params: Vec<Value>,
}

/// AND together the SQL form of every constraint.
///
/// Text predicates compare against the `*_lower` columns, since SQLite's
/// `LOWER()` only folds ASCII.
pub(crate) fn build_filter(constraints: &[Constraint]) -> Filter {
    let mut parts = Vec::new();
    let mut params = Vec::new();

    for constraint in constraints {
        match constraint {
            Constraint::CityEquals(city) => {
                parts.push("city_lower = ?".to_string());
                params.push(Value::Text(city.to_lowercase()));
            }
            Constraint::LocalityContains(locality) => {
                parts.push("INSTR(locality_lower, ?) > 0".to_string());
                params.push(Value::Text(locality.to_lowercase()));
            }
            Constraint::Bhk(pattern) => {
                let accepted = pattern.accepted();
                let slots = vec!["?"; accepted.len()].join(", ");
                parts.push(format!("bhk_normalized IN ({slots})"));
                params.extend(accepted.into_iter().map(Value::Text));
            }
            Constraint::PriceAtMost(bound) => {
                parts.push("base_price <= ?".to_string());
                params.push(Value::Real(*bound));
            }
            Constraint::PriceAtLeast(bound) => {
                parts.push("base_price >= ?".to_string());
                params.push(Value::Real(*bound));
            }
            Constraint::ReadinessIs(readiness) => {
                parts.push("readiness = ?".to_string());
                params.push(Value::Text(readiness.label().to_string()));
            }
            Constraint::NameContains(name) => {
                parts.push("INSTR(name_lower, ?) > 0".to_string());
                params.push(Value::Text(name.to_lowercase()));
            }
        }
    }

    let clause = if parts.is_empty() {
        "1=1".to_string()
    } else {
        parts.join(" AND ")
    };
    Filter { clause, params }
}

/// `ORDER BY` terms; rowid breaks ties.
pub(crate) fn build_order(order: &[SortKey]) -> String {
    let mut terms: Vec<&str> = order
        .iter()
        .map(|key| match key {
            SortKey::ReadyToMoveFirst => {
                "CASE WHEN readiness = 'Ready to Move' THEN 0 ELSE 1 END"
            }
            SortKey::PriceAscending => "base_price IS NULL, base_price ASC",
        })
        .collect();
    terms.push("rowid ASC");
    terms.join(", ")
}

/// Map a row selected with [`COLUMNS`].
pub(crate) fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PropertyRecord> {
    let readiness: String = row.get(7)?;
    let amenities: String = row.get(9)?;
    let embedding: Option<Vec<u8>> = row.get(16)?;
    let created_at: Option<String> = row.get(17)?;
    let updated_at: Option<String> = row.get(18)?;

    Ok(PropertyRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        bhk: row.get(3)?,
        base_price: row.get(4)?,
        city: row.get(5)?,
        locality: row.get(6)?,
        readiness: Readiness::from_label(&readiness),
        carpet_area: row.get(8)?,
        amenities: decode_amenities(&amenities),
        address: row.get(10)?,
        summary: row.get(11)?,
        slug: row.get(12)?,
        possession: row.get(13)?,
        project_type: row.get(14)?,
        project_category: row.get(15)?,
        embedding: embedding.as_deref().and_then(decode_embedding),
        created_at: created_at.as_deref().and_then(parse_timestamp),
        updated_at: updated_at.as_deref().and_then(parse_timestamp),
    })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use propsearch_protocols::BhkPattern;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = build_filter(&[]);
        assert_eq!(filter.clause, "1=1");
        assert!(filter.params.is_empty());
    }

    #[test]
    fn test_office_expands_to_aliases() {
        let filter = build_filter(&[Constraint::Bhk(BhkPattern::Office)]);
        assert_eq!(filter.clause, "bhk_normalized IN (?, ?)");
        assert_eq!(filter.params.len(), 2);
    }

    #[test]
    fn test_filter_params_are_lowercased() {
        let filter = build_filter(&[
            Constraint::CityEquals("Pune".to_string()),
            Constraint::PriceAtMost(5.5),
        ]);
        assert_eq!(filter.clause, "city_lower = ? AND base_price <= ?");
        assert_eq!(filter.params[0], Value::Text("pune".to_string()));
        assert_eq!(filter.params[1], Value::Real(5.5));
    }

    #[test]
    fn test_order_ends_with_rowid() {
        assert_eq!(build_order(&[]), "rowid ASC");
        assert!(build_order(&[SortKey::PriceAscending]).starts_with("base_price IS NULL"));
    }
}
