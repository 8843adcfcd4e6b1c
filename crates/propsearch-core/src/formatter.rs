//! Display projection of property records.

use propsearch_protocols::{
    PropertyCard, PropertyRecord, UNKNOWN_BHK, UNKNOWN_CITY, UNKNOWN_LOCALITY,
};

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Amenities shown when a listing has none.
pub const DEFAULT_AMENITIES: [&str; 2] = ["Gym", "Parking"];

/// Format an amount in rupees.
///
/// Crores and lakhs are shown with two decimals; smaller amounts are rounded
/// to whole rupees with Indian digit grouping.
pub fn format_price(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.2} Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.2} L", amount / LAKH)
    } else {
        format!("₹{}", group_indian(amount.round() as i64))
    }
}

/// Group digits as 12,34,567: the last three, then pairs.
fn group_indian(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{sign}{},{tail}", groups.join(","))
}

/// Project a record into a display card.
pub fn format_card(record: &PropertyRecord) -> PropertyCard {
    let bhk = record.bhk.as_deref().unwrap_or(UNKNOWN_BHK);
    let city = record.city.as_deref().unwrap_or(UNKNOWN_CITY);
    let locality = record.locality.as_deref().unwrap_or(UNKNOWN_LOCALITY);

    let amenities = if record.amenities.is_empty() {
        DEFAULT_AMENITIES.iter().map(|a| a.to_string()).collect()
    } else {
        record.amenities.clone()
    };

    PropertyCard {
        title: format!("{bhk} Flat in {locality}"),
        city_locality: format!("{city}, {locality}"),
        bhk: bhk.to_string(),
        price: format_price(record.base_price.unwrap_or(0.0)),
        project_name: record.name.clone(),
        possession_status: record.readiness.label().to_string(),
        amenities,
        cta_url: format!("/project/{}", record.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propsearch_protocols::Readiness;

    #[test]
    fn test_format_crore() {
        assert_eq!(format_price(12_000_000.0), "₹1.20 Cr");
        assert_eq!(format_price(10_000_000.0), "₹1.00 Cr");
    }

    #[test]
    fn test_format_lakh() {
        assert_eq!(format_price(250_000.0), "₹2.50 L");
        assert_eq!(format_price(9_999_999.0), "₹100.00 L");
    }

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_price(50_000.0), "₹50,000");
        assert_eq!(format_price(999.0), "₹999");
        assert_eq!(format_price(0.0), "₹0");
        assert_eq!(format_price(1_234.4), "₹1,234");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(group_indian(123_456), "1,23,456");
        assert_eq!(group_indian(12_345_678), "1,23,45,678");
        assert_eq!(group_indian(1_000), "1,000");
        assert_eq!(group_indian(-45_000), "-45,000");
    }

    #[test]
    fn test_card_from_full_record() {
        let record = PropertyRecord::new("p42", "Skyline Towers")
            .with_bhk("3BHK")
            .with_price(8_300_000.0)
            .with_location("Pune", "Hinjewadi")
            .with_readiness(Readiness::UnderConstruction)
            .with_amenities(["Pool", "Clubhouse"]);

        let card = format_card(&record);
        assert_eq!(card.title, "3BHK Flat in Hinjewadi");
        assert_eq!(card.city_locality, "Pune, Hinjewadi");
        assert_eq!(card.bhk, "3BHK");
        assert_eq!(card.price, "₹83.00 L");
        assert_eq!(card.project_name, "Skyline Towers");
        assert_eq!(card.possession_status, "Under Construction");
        assert_eq!(card.amenities, vec!["Pool", "Clubhouse"]);
        assert_eq!(card.cta_url, "/project/p42");
    }

    #[test]
    fn test_card_fallbacks() {
        let card = format_card(&PropertyRecord::new("x", "Bare"));
        assert_eq!(card.title, "N/A Flat in Unknown Locality");
        assert_eq!(card.city_locality, "Unknown City, Unknown Locality");
        assert_eq!(card.bhk, "N/A");
        assert_eq!(card.price, "₹0");
        assert_eq!(card.possession_status, "Unknown");
        assert_eq!(card.amenities, vec!["Gym", "Parking"]);
    }

    #[test]
    fn test_card_is_deterministic() {
        let record = PropertyRecord::new("p1", "A").with_price(5_400_000.0);
        assert_eq!(format_card(&record), format_card(&record));
    }
}
