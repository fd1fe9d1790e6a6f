//! Fallback Generator: minimal deterministic prompt used when the main
//! pipeline fails. Reads the raw request directly; never fails itself.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::generation::prompts::FALLBACK_PROMPT_TEMPLATE;

pub const FALLBACK_OCCASION: &str = "date night";
pub const FALLBACK_BUDGET: &str = "moderate";
pub const FALLBACK_LOCATION: &str = "your city";

static SLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(occasion|budget|location)\}").expect("valid slot regex"));

pub fn fallback_prompt(user_data: &Value, occasion_override: Option<&str>) -> String {
    let occasion = occasion_override
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .or_else(|| raw_text(user_data, "occasion"))
        .unwrap_or_else(|| FALLBACK_OCCASION.to_string());
    let budget = raw_text(user_data, "budget").unwrap_or_else(|| FALLBACK_BUDGET.to_string());
    let location = raw_text(user_data, "location_city")
        .or_else(|| raw_text(user_data, "location_type"))
        .unwrap_or_else(|| FALLBACK_LOCATION.to_string());

    SLOT.replace_all(FALLBACK_PROMPT_TEMPLATE, |caps: &Captures| match &caps[1] {
        "occasion" => occasion.clone(),
        "budget" => budget.clone(),
        _ => location.clone(),
    })
    .into_owned()
}

fn raw_text(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_empty() {
        let out = fallback_prompt(&json!({}), None);
        assert!(out.contains("date night"));
        assert!(out.contains("Budget: moderate"));
        assert!(out.contains("your city"));
        assert!(out.contains("USER CONTEXT"));
        assert!(out.contains("RESPONSE FORMAT"));
    }

    #[test]
    fn test_interpolates_raw_values() {
        let out = fallback_prompt(
            &json!({"occasion": "birthday", "budget": "high", "location_city": "Rome"}),
            None,
        );
        assert!(out.contains("personalized birthday experience in Rome for a high budget"));
    }

    #[test]
    fn test_override_beats_raw_occasion() {
        let out = fallback_prompt(&json!({"occasion": "birthday"}), Some("proposal"));
        assert!(out.contains("Occasion: proposal"));
        assert!(!out.contains("birthday"));
    }

    #[test]
    fn test_slot_text_in_values_is_not_expanded() {
        let out = fallback_prompt(&json!({"occasion": "{budget}", "budget": "low"}), None);
        assert!(out.contains("Occasion: {budget}"));
    }

    #[test]
    fn test_output_is_valid_shape_for_any_input() {
        let out = fallback_prompt(&json!(null), None);
        assert!(out.contains("experience_title"));
        assert!(!out.contains("{occasion}"));
    }
}
