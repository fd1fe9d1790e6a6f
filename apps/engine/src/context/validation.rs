//! Template content validation: structural and safety checks run before a
//! template body is accepted into the catalog.
//!
//! Missing recommended placeholders and oversized bodies are warnings only.
//! Short bodies and embedded active markup are errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_CONTENT_LENGTH: usize = 100;
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Placeholders every good template should carry.
pub const RECOMMENDED_PLACEHOLDERS: &[&str] = &["location", "budget", "occasion"];

static UNSAFE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)<\s*script\b", "embedded <script> tag"),
        (r"(?i)javascript\s*:", "javascript: URI"),
        (r"(?i)data\s*:\s*text/html", "data:text/html URI"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).expect("valid unsafe-markup regex"), label))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_findings(warnings: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            warnings,
            errors,
        }
    }
}

/// Checks a candidate template body. Length is measured in characters.
pub fn validate_template_content(content: &str) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    for name in RECOMMENDED_PLACEHOLDERS {
        let token = format!("{{{{{name}}}}}");
        if !content.contains(&token) {
            warnings.push(format!("Missing recommended placeholder: {token}"));
        }
    }

    let length = content.chars().count();
    if length < MIN_CONTENT_LENGTH {
        errors.push(format!(
            "Template content is too short ({length} characters, minimum {MIN_CONTENT_LENGTH})"
        ));
    } else if length > MAX_CONTENT_LENGTH {
        warnings.push(format!(
            "Template content is very long ({length} characters, recommended maximum {MAX_CONTENT_LENGTH})"
        ));
    }

    for (re, label) in UNSAFE_PATTERNS.iter() {
        if re.is_match(content) {
            errors.push(format!("Potentially unsafe content detected: {label}"));
        }
    }

    ValidationResult::from_findings(warnings, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_body() -> String {
        format!(
            "Design a memorable {{{{occasion}}}} in {{{{location}}}} for a {{{{budget}}}} budget. {}",
            "Focus on small rituals and thoughtful details. ".repeat(3)
        )
    }

    #[test]
    fn test_valid_body_has_no_findings() {
        let r = validate_template_content(&valid_body());
        assert!(r.is_valid);
        assert!(r.warnings.is_empty(), "warnings: {:?}", r.warnings);
        assert!(r.errors.is_empty());
    }

    #[test]
    fn test_too_short_is_error() {
        let r = validate_template_content(&"x".repeat(50));
        assert!(!r.is_valid);
        assert!(r.errors.iter().any(|e| e.contains("too short")));
    }

    #[test]
    fn test_exactly_minimum_length_is_not_short() {
        let r = validate_template_content(&"x".repeat(MIN_CONTENT_LENGTH));
        assert!(r.is_valid);
    }

    #[test]
    fn test_script_tag_is_error_regardless_of_length() {
        let body = format!("{}<script>alert(1)</script>", valid_body());
        let r = validate_template_content(&body);
        assert!(!r.is_valid);
        assert!(r.errors.iter().any(|e| e.contains("unsafe")));
    }

    #[test]
    fn test_javascript_and_data_uris_are_errors() {
        let body = format!("{} <a href=\"JavaScript:go()\">x</a>", valid_body());
        assert!(!validate_template_content(&body).is_valid);
        let body = format!("{} data:text/html;base64,AAAA", valid_body());
        assert!(!validate_template_content(&body).is_valid);
    }

    #[test]
    fn test_overlong_body_is_warning_only() {
        let r = validate_template_content(&"y".repeat(6000));
        assert!(r.is_valid);
        assert!(r.errors.is_empty());
        assert!(r.warnings.iter().any(|w| w.contains("very long")));
    }

    #[test]
    fn test_missing_placeholders_warn_individually() {
        let body = format!("Plan something in {{{{location}}}}. {}", "a".repeat(120));
        let r = validate_template_content(&body);
        assert!(r.is_valid);
        assert_eq!(r.warnings.len(), 2);
        assert!(r.warnings.iter().any(|w| w.contains("{{budget}}")));
        assert!(r.warnings.iter().any(|w| w.contains("{{occasion}}")));
    }

    #[test]
    fn test_validity_tracks_errors_only() {
        let r = validate_template_content(&"z".repeat(20));
        assert_eq!(r.is_valid, r.errors.is_empty());
        assert_eq!(r.warnings.len(), 3);
    }

    #[test]
    fn test_every_unsafe_pattern_is_active() {
        assert_eq!(UNSAFE_PATTERNS.len(), 3);
    }
}
