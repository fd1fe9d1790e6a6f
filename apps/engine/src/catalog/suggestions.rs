//! Suggestion Ranker: picks templates matching a user's stated preferences.
//!
//! Availability over precision: if the filtered lookup fails, a handful of
//! active templates is returned unfiltered instead of an empty list.

use serde_json::Value;
use tracing::{error, warn};

use crate::context::builder::BudgetTier;
use crate::models::template::TemplateRef;
use crate::store::TemplateStore;

pub const MAX_SUGGESTIONS: usize = 10;
pub const FALLBACK_SUGGESTIONS: usize = 5;

/// Template types that suit each budget tier.
pub fn types_for_budget(budget: BudgetTier) -> &'static [&'static str] {
    match budget {
        BudgetTier::Low => &["budget_friendly", "casual"],
        BudgetTier::Moderate => &["casual", "romantic", "creative"],
        BudgetTier::High => &["luxurious", "romantic", "adventurous"],
        BudgetTier::Unlimited => &["luxurious", "adventurous", "creative"],
    }
}

pub async fn get_template_suggestions(
    store: &dyn TemplateStore,
    preferences: &Value,
) -> Vec<TemplateRef> {
    let budget = preferences
        .get("budget")
        .and_then(Value::as_str)
        .and_then(BudgetTier::parse)
        .unwrap_or_default();
    let occasion = preferences
        .get("occasion")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|o| !o.is_empty());

    match store.find_active_by_types(types_for_budget(budget)).await {
        Ok(candidates) => rank_templates(candidates, occasion),
        Err(e) => {
            warn!("Template suggestion lookup failed, returning unfiltered templates: {e}");
            store
                .active_templates(FALLBACK_SUGGESTIONS)
                .await
                .unwrap_or_else(|e| {
                    error!("Unfiltered template lookup also failed: {e}");
                    Vec::new()
                })
        }
    }
}

/// Applies the occasion filter, then orders by usage and rating (both
/// descending) and keeps the top `MAX_SUGGESTIONS`.
pub fn rank_templates(candidates: Vec<TemplateRef>, occasion: Option<&str>) -> Vec<TemplateRef> {
    let mut survivors: Vec<TemplateRef> = match occasion {
        Some(occasion) => {
            let needle = occasion.to_lowercase();
            candidates
                .into_iter()
                .filter(|t| matches_occasion(t, &needle))
                .collect()
        }
        None => candidates,
    };

    survivors.sort_by(|a, b| {
        b.usage_count
            .cmp(&a.usage_count)
            .then_with(|| rating_key(b).total_cmp(&rating_key(a)))
    });
    survivors.truncate(MAX_SUGGESTIONS);
    survivors
}

/// A NaN rating (zero ratings averaged) ranks as unrated.
fn rating_key(template: &TemplateRef) -> f64 {
    if template.average_rating.is_nan() {
        0.0
    } else {
        template.average_rating
    }
}

fn matches_occasion(template: &TemplateRef, needle: &str) -> bool {
    template
        .occasion_tags
        .iter()
        .chain(template.tags.iter())
        .any(|tag| tag.to_lowercase().contains(needle))
}
