//! Personalizer: closed-vocabulary `{{name}}` substitution.
//!
//! Substitution is a single regex pass: replaced text is never scanned again,
//! so a free-text field containing `{{location}}` stays literal.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::context::builder::RequestContext;
use crate::errors::EngineError;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("valid placeholder regex"));

/// Fills a resolved template body from a request context.
///
/// The engine holds this as `Arc<dyn Personalize>`; the default is
/// `PlaceholderPersonalizer`.
pub trait Personalize: Send + Sync {
    fn personalize(&self, body: &str, ctx: &RequestContext) -> Result<String, EngineError>;
}

/// Replaces recognized placeholders and leaves unknown ones untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderPersonalizer;

impl Personalize for PlaceholderPersonalizer {
    fn personalize(&self, body: &str, ctx: &RequestContext) -> Result<String, EngineError> {
        Ok(substitute_placeholders(body, ctx))
    }
}

pub fn substitute_placeholders(body: &str, ctx: &RequestContext) -> String {
    PLACEHOLDER
        .replace_all(body, |caps: &Captures| {
            ctx.placeholder_value(&caps[1])
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RequestContext {
        RequestContext::build(
            &json!({
                "location_city": "Kyoto",
                "budget": "high",
                "occasion": "anniversary",
                "special_requirements": "{{location}} {{budget}}"
            }),
            None,
        )
    }

    #[test]
    fn test_replaces_recognized_placeholders() {
        let out = substitute_placeholders("A {{budget}} {{occasion}} in {{location}}.", &ctx());
        assert_eq!(out, "A high anniversary in Kyoto.");
    }

    #[test]
    fn test_unknown_placeholder_left_literal() {
        let out = substitute_placeholders("Bring {{partner_name}} to {{location}}", &ctx());
        assert_eq!(out, "Bring {{partner_name}} to Kyoto");
    }

    #[test]
    fn test_unset_field_becomes_empty() {
        let out = substitute_placeholders("Weather: [{{weather}}]", &ctx());
        assert_eq!(out, "Weather: []");
    }

    #[test]
    fn test_substituted_text_is_not_reevaluated() {
        let out = substitute_placeholders("Needs: {{special_requirements}}", &ctx());
        assert_eq!(out, "Needs: {{location}} {{budget}}");
    }

    #[test]
    fn test_spaced_or_single_brace_forms_are_not_placeholders() {
        let out = substitute_placeholders("{{ location }} {location}", &ctx());
        assert_eq!(out, "{{ location }} {location}");
    }

    #[test]
    fn test_trait_object_dispatch() {
        let p: &dyn Personalize = &PlaceholderPersonalizer;
        assert_eq!(p.personalize("{{location}}", &ctx()).unwrap(), "Kyoto");
    }
}
