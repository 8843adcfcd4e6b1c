//! Extraction prompt.

/// Instructions sent as the system message.
const INSTRUCTIONS: &str = r#"You are a real estate search assistant. Extract property search filters from the user's query.

Respond with a single JSON object with exactly these keys:
  "city": string or null (e.g. Pune, Mumbai, Bangalore; only if explicitly mentioned)
  "locality": string or null (area name, e.g. Hinjewadi, Mamurdi, Andheri)
  "bhk": string or null (configuration, e.g. 1BHK, 2BHK, 3BHK, Office, Office space)
  "minPrice": number or null (minimum budget in INR)
  "maxPrice": number or null (maximum budget in INR)
  "readiness": "Ready to Move" | "Under Construction" | null
  "projectName": string or null (specific project name, e.g. Pristine, Godrej)
  "projectType": "RESIDENTIAL" | "COMMERCIAL" | "BOTH" | null
  "projectCategory": "TOWNSHIP" | "STANDALONE" | "COMPLEX" | null

Instructions:
- Extract city, locality, BHK, budget, readiness and project name exactly as mentioned
- Budgets are plain rupee numbers: 1 Lakh = 100000, 1 Cr = 10000000
  ("50 lakhs" -> 5000000, "1.5 cr" -> 15000000, "1 crore" -> 10000000)
- "under 80 lakh" sets only maxPrice; "above 1 cr" sets only minPrice
- BHK: "2 bhk" or "2 bedroom" -> "2BHK", "3 bhk" or "3 bedroom" -> "3BHK"
- BHK: "office space" -> "Office space", "office" on its own -> "Office"
- Fix common city and locality typos ("Mumabi" -> "Mumbai", "Hinjwadi" -> "Hinjewadi")
- If something is not mentioned, set it to null"#;

/// System and user messages for one query.
pub fn build_prompt(query: &str) -> (&'static str, String) {
    (INSTRUCTIONS, format!("User Query: \"{}\"", query.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_conversions() {
        let (system, _) = build_prompt("x");
        assert!(system.contains("1 Lakh = 100000"));
        assert!(system.contains("1 Cr = 10000000"));
        assert!(system.contains("\"Office space\""));
    }

    #[test]
    fn test_user_message_quotes_query() {
        let (_, user) = build_prompt("  3bhk in Hinjewadi under 80L ");
        assert_eq!(user, "User Query: \"3bhk in Hinjewadi under 80L\"");
    }
}
