use super::*;
use crate::testing::{listing, StubStore};
use propsearch_protocols::Readiness::{ReadyToMove, UnderConstruction};
use propsearch_protocols::{PropertyRecord, Readiness};

fn ids(records: &[PropertyRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_constraints_only_for_present_fields() {
    let policy = SearchPolicy::default();
    assert!(structured_constraints(&ParsedFilters::default(), &policy).is_empty());

    let filters = ParsedFilters {
        city: Some("Pune".to_string()),
        max_price: Some(5_000_000.0),
        ..Default::default()
    };
    let constraints = structured_constraints(&filters, &policy);
    assert_eq!(constraints.len(), 2);
    assert_eq!(constraints[0], Constraint::CityEquals("Pune".to_string()));
    match constraints[1] {
        Constraint::PriceAtMost(bound) => assert!((bound - 5_500_000.0).abs() < 1e-6),
        ref other => panic!("unexpected constraint: {other:?}"),
    }
}

#[test]
fn test_office_filter_builds_office_pattern() {
    let filters = ParsedFilters {
        bhk: Some("Office".to_string()),
        ..Default::default()
    };
    let constraints = structured_constraints(&filters, &SearchPolicy::default());
    assert_eq!(constraints, vec![Constraint::Bhk(BhkPattern::Office)]);
}

#[tokio::test]
async fn test_price_ceiling_tolerance() {
    let store = StubStore::new(vec![
        listing("in", "2BHK", 5_400_000.0, "Pune", "Baner", ReadyToMove),
        listing("out", "2BHK", 5_600_001.0, "Pune", "Baner", ReadyToMove),
    ]);
    let filters = ParsedFilters {
        max_price: Some(5_000_000.0),
        ..Default::default()
    };

    let result = structured_search(&store, &filters, &SearchPolicy::default()).await;
    assert!(!result.degraded);
    assert_eq!(ids(&result.records), vec!["in"]);
}

#[tokio::test]
async fn test_price_floor_tolerance() {
    let store = StubStore::new(vec![
        listing("in", "2BHK", 4_750_000.0, "Pune", "Baner", ReadyToMove),
        listing("out", "2BHK", 4_749_000.0, "Pune", "Baner", ReadyToMove),
    ]);
    let filters = ParsedFilters {
        min_price: Some(5_000_000.0),
        ..Default::default()
    };

    let result = structured_search(&store, &filters, &SearchPolicy::default()).await;
    assert_eq!(ids(&result.records), vec!["in"]);
}

#[tokio::test]
async fn test_absent_price_never_matches_price_filter() {
    let store = StubStore::new(vec![
        PropertyRecord::new("unpriced", "No Price").with_bhk("2BHK"),
        listing("priced", "2BHK", 1_000_000.0, "Pune", "Baner", ReadyToMove),
    ]);
    let filters = ParsedFilters {
        max_price: Some(90_000_000.0),
        ..Default::default()
    };

    let result = structured_search(&store, &filters, &SearchPolicy::default()).await;
    assert_eq!(ids(&result.records), vec!["priced"]);
}

#[tokio::test]
async fn test_bhk_spacing_and_case_ignored() {
    let store = StubStore::new(vec![
        listing("a", "2 BHK", 1.0, "Pune", "Baner", ReadyToMove),
        listing("b", "2bhk", 2.0, "Pune", "Baner", ReadyToMove),
        listing("c", "3BHK", 3.0, "Pune", "Baner", ReadyToMove),
    ]);
    let filters = ParsedFilters {
        bhk: Some("2BHK".to_string()),
        ..Default::default()
    };

    let result = structured_search(&store, &filters, &SearchPolicy::default()).await;
    assert_eq!(ids(&result.records), vec!["a", "b"]);
}

#[tokio::test]
async fn test_office_matches_both_aliases() {
    let store = StubStore::new(vec![
        listing("a", "Office space", 1.0, "Pune", "Baner", ReadyToMove),
        listing("b", "office", 2.0, "Pune", "Baner", ReadyToMove),
        listing("c", "1BHK", 3.0, "Pune", "Baner", ReadyToMove),
    ]);
    let filters = ParsedFilters {
        bhk: Some("Office".to_string()),
        ..Default::default()
    };

    let result = structured_search(&store, &filters, &SearchPolicy::default()).await;
    assert_eq!(ids(&result.records), vec!["a", "b"]);
}

#[tokio::test]
async fn test_readiness_then_price_ordering() {
    let store = StubStore::new(vec![
        listing("uc-cheap", "2BHK", 1_000_000.0, "Pune", "Baner", UnderConstruction),
        listing("rtm-dear", "2BHK", 9_000_000.0, "Pune", "Baner", ReadyToMove),
        listing("rtm-cheap", "2BHK", 3_000_000.0, "Pune", "Baner", ReadyToMove),
        listing("unknown", "2BHK", 500_000.0, "Pune", "Baner", Readiness::Unknown),
    ]);
    let filters = ParsedFilters {
        city: Some("pune".to_string()),
        ..Default::default()
    };

    let result = structured_search(&store, &filters, &SearchPolicy::default()).await;
    assert_eq!(
        ids(&result.records),
        vec!["rtm-cheap", "rtm-dear", "unknown", "uc-cheap"]
    );
}

#[tokio::test]
async fn test_locality_substring_and_project_name() {
    let store = StubStore::new(vec![
        listing("a", "2BHK", 1.0, "Pune", "Hinjewadi Phase 1", ReadyToMove),
        listing("b", "2BHK", 2.0, "Pune", "Wakad", ReadyToMove),
    ]);
    let filters = ParsedFilters {
        locality: Some("hinjewadi".to_string()),
        project_name: Some("project A".to_string()),
        ..Default::default()
    };

    let result = structured_search(&store, &filters, &SearchPolicy::default()).await;
    assert_eq!(ids(&result.records), vec!["a"]);
}

#[tokio::test]
async fn test_limit_applied() {
    let records = (0..30)
        .map(|i| listing(&format!("p{i}"), "2BHK", i as f64, "Pune", "Baner", ReadyToMove))
        .collect();
    let store = StubStore::new(records);
    let policy = SearchPolicy {
        structured_limit: 5,
        ..Default::default()
    };

    let result = structured_search(&store, &ParsedFilters::default(), &policy).await;
    assert_eq!(result.records.len(), 5);
    assert_eq!(store.last_query.lock().as_ref().map(|q| q.limit), Some(5));
}

#[tokio::test]
async fn test_store_failure_is_degraded() {
    let store = StubStore::failing();
    let result =
        structured_search(&store, &ParsedFilters::default(), &SearchPolicy::default()).await;
    assert!(result.degraded);
    assert!(result.records.is_empty());
}
