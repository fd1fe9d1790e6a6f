//! Prompt Assembler: joins the five prompt sections with blank lines.
//!
//! Order: persona, USER CONTEXT, MISSION, RESPONSE FORMAT, QUALITY GUIDELINES.

use crate::context::builder::RequestContext;
use crate::generation::prompts::{
    MISSION_HEADER, PERSONA_SYSTEM, QUALITY_GUIDELINES, RESPONSE_FORMAT, USER_CONTEXT_HEADER,
};

pub fn assemble_prompt(ctx: &RequestContext, personalized_body: &str) -> String {
    [
        PERSONA_SYSTEM.to_string(),
        user_context_section(ctx),
        format!("{MISSION_HEADER}\n{}", personalized_body.trim()),
        RESPONSE_FORMAT.to_string(),
        QUALITY_GUIDELINES.to_string(),
    ]
    .join("\n\n")
}

/// Bulleted context. Optional fields appear only when non-empty; budget,
/// occasion, season, duration and time of day are always listed.
pub fn user_context_section(ctx: &RequestContext) -> String {
    let mut lines = vec![USER_CONTEXT_HEADER.to_string()];

    let mut optional = |label: &str, value: &str| {
        if !value.is_empty() {
            lines.push(format!("- {label}: {value}"));
        }
    };
    optional("Location", &ctx.location);
    optional("Personality & interests", &ctx.personality);
    optional(
        "Relationship stage",
        ctx.relationship_stage.as_deref().unwrap_or_default(),
    );
    optional(
        "Special requirements",
        ctx.special_requirements.as_deref().unwrap_or_default(),
    );
    optional("Weather", ctx.weather.as_deref().unwrap_or_default());
    optional("Custom preferences", &ctx.custom_preferences_text());

    lines.push(format!("- Budget: {}", ctx.budget));
    lines.push(format!("- Occasion: {}", ctx.occasion));
    lines.push(format!("- Season: {}", ctx.season.description()));
    lines.push(format!("- Duration: {}", ctx.duration));
    lines.push(format!("- Time of day: {}", ctx.time_of_day));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA_KEYS: &[&str] = &[
        "experience_title",
        "main_concept",
        "detailed_plan",
        "preparation",
        "timeline",
        "surprise_elements",
        "backup_plans",
        "personalization_touches",
        "budget_breakdown",
        "essential_items",
        "optional_upgrades",
        "affiliate_recommendations",
        "flowers",
        "dining",
        "gifts",
        "experiences",
        "success_tips",
        "memorable_moments",
    ];

    #[test]
    fn test_minimal_context_lists_only_unconditional_fields() {
        let ctx = RequestContext::build(&json!({}), None);
        let section = user_context_section(&ctx);
        assert!(section.contains("- Budget: moderate"));
        assert!(section.contains("- Occasion: date_night"));
        assert!(section.contains("- Season: "));
        assert!(section.contains("- Duration: 2-4 hours"));
        assert!(section.contains("- Time of day: evening"));
        assert!(!section.contains("Location"));
        assert!(!section.contains("Weather"));
        assert!(!section.contains("Relationship stage"));
        assert_eq!(section.lines().count(), 6);
    }

    #[test]
    fn test_optional_fields_included_when_present() {
        let ctx = RequestContext::build(
            &json!({
                "location_city": "Paris",
                "relationship_stage": "engaged",
                "weather": "light rain",
                "custom_preferences": {"cuisine": "french"}
            }),
            None,
        );
        let section = user_context_section(&ctx);
        assert!(section.contains("- Location: Paris"));
        assert!(section.contains("- Relationship stage: engaged"));
        assert!(section.contains("- Weather: light rain"));
        assert!(section.contains("- Custom preferences: cuisine: french"));
    }

    #[test]
    fn test_sections_in_order() {
        let ctx = RequestContext::build(&json!({}), None);
        let prompt = assemble_prompt(&ctx, "Plan the evening.");
        let positions: Vec<usize> = [
            "romantic experience designer",
            "USER CONTEXT:",
            "MISSION:\nPlan the evening.",
            "RESPONSE FORMAT:",
            "QUALITY GUIDELINES:",
        ]
        .iter()
        .map(|marker| prompt.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_schema_vocabulary_present() {
        let ctx = RequestContext::build(&json!({}), None);
        let prompt = assemble_prompt(&ctx, "body");
        for key in SCHEMA_KEYS {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing key {key}");
        }
    }
}
