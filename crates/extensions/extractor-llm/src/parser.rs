//! Model output parsing.

use serde_json::{Map, Value};

use propsearch_protocols::{ExtractedFields, ExtractionError};

const PRICE_KEYS: [&str; 2] = ["minPrice", "maxPrice"];

/// Parse the assistant message into raw filter fields.
///
/// Accepts a bare JSON object or one wrapped in a markdown code fence.
/// Numeric strings in the price fields are coerced; any other shape
/// mismatch is `Malformed`.
pub fn parse_fields(content: &str) -> Result<ExtractedFields, ExtractionError> {
    let body = strip_fence(content.trim());
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ExtractionError::Malformed(format!("invalid JSON: {e}")))?;

    let Value::Object(mut object) = value else {
        return Err(ExtractionError::Malformed(
            "expected a JSON object".to_string(),
        ));
    };
    coerce_prices(&mut object);

    serde_json::from_value(Value::Object(object))
        .map_err(|e| ExtractionError::Malformed(e.to_string()))
}

fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn coerce_prices(object: &mut Map<String, Value>) {
    for key in PRICE_KEYS {
        let Some(Value::String(raw)) = object.get(key) else {
            continue;
        };
        let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
        let coerced = cleaned
            .parse::<f64>()
            .ok()
            .and_then(|n| serde_json::Number::from_f64(n).map(Value::Number))
            .unwrap_or(Value::Null);
        object.insert(key.to_string(), coerced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let fields = parse_fields(
            r#"{"city":null,"locality":"Hinjewadi","bhk":"3BHK","minPrice":null,"maxPrice":8000000,"readiness":null,"projectName":null}"#,
        )
        .unwrap();
        assert_eq!(fields.locality.as_deref(), Some("Hinjewadi"));
        assert_eq!(fields.bhk.as_deref(), Some("3BHK"));
        assert_eq!(fields.max_price, Some(8_000_000.0));
        assert!(fields.city.is_none());
    }

    #[test]
    fn test_parse_fenced_object() {
        let fields = parse_fields("```json\n{\"city\": \"Pune\"}\n```").unwrap();
        assert_eq!(fields.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_parse_missing_keys_default_to_none() {
        let fields = parse_fields("{}").unwrap();
        assert_eq!(fields, ExtractedFields::default());
    }

    #[test]
    fn test_price_strings_coerced() {
        let fields =
            parse_fields(r#"{"minPrice":"50,00,000","maxPrice":"about a crore"}"#).unwrap();
        assert_eq!(fields.min_price, Some(5_000_000.0));
        assert!(fields.max_price.is_none());
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(
            parse_fields("[1, 2]"),
            Err(ExtractionError::Malformed(_))
        ));
        assert!(matches!(
            parse_fields("not json"),
            Err(ExtractionError::Malformed(_))
        ));
    }

    #[test]
    fn test_wrong_field_type_is_malformed() {
        assert!(matches!(
            parse_fields(r#"{"city": 42}"#),
            Err(ExtractionError::Malformed(_))
        ));
    }
}
