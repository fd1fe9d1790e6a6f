//! Content Resolver: produces the occasion-augmented template variant, with a
//! version-aware cache in front of it.
//!
//! The augmented body is a pure function of (template content, occasion
//! category), so concurrent writers racing on one key store identical text.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::PromptCache;
use crate::context::builder::RequestContext;
use crate::models::template::TemplateRef;

/// Occasion families that drive augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccasionCategory {
    Romantic,
    FirstDate,
    Proposal,
    General,
}

impl OccasionCategory {
    pub fn classify(occasion: &str) -> Self {
        let normalized = occasion
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == ' ' || c == '-', "_");
        if normalized.contains("proposal") || normalized.contains("engagement") {
            OccasionCategory::Proposal
        } else if normalized.contains("first_date") {
            OccasionCategory::FirstDate
        } else if normalized.contains("anniversary")
            || normalized.contains("romantic")
            || normalized.contains("valentine")
        {
            OccasionCategory::Romantic
        } else {
            OccasionCategory::General
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            OccasionCategory::Romantic => "romantic",
            OccasionCategory::FirstDate => "first_date",
            OccasionCategory::Proposal => "proposal",
            OccasionCategory::General => "general",
        }
    }

    /// Guidance block appended after the base body, if any.
    pub fn augmentation(&self) -> Option<&'static str> {
        match self {
            OccasionCategory::Romantic => Some(ROMANTIC_BLOCK),
            OccasionCategory::FirstDate => Some(FIRST_DATE_BLOCK),
            OccasionCategory::Proposal => Some(PROPOSAL_BLOCK),
            OccasionCategory::General => None,
        }
    }
}

impl fmt::Display for OccasionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ROMANTIC_BLOCK: &str = "SPECIAL FOCUS - ROMANCE & CONNECTION:
- Emphasize intimacy: quiet settings, unhurried pacing, and moments for just the two of you.
- Weave in rituals: a toast, a shared keepsake, or revisiting a meaningful place.
- Reference shared history and milestones wherever the context allows.";

const FIRST_DATE_BLOCK: &str = "SPECIAL FOCUS - FIRST DATE COMFORT & SAFETY:
- Choose public, well-lit venues that are easy to reach and easy to leave.
- Keep the plan light and flexible, with natural conversation starters.
- Avoid anything overly intimate, expensive, or high-pressure.";

const PROPOSAL_BLOCK: &str = "SPECIAL FOCUS - PROPOSAL PLANNING:
- Explain why the chosen venue is significant to the couple.
- Plan the exact moment: timing, positioning, lighting, and who else is involved.
- Provide contingency plans for weather, crowds, and the ring's safekeeping.";

/// Cache key for a template variant. The version changes on every edit, so a
/// stale body can never be read back after the template changes.
pub fn cache_key(template: &TemplateRef, category: OccasionCategory) -> String {
    format!(
        "template_content:{}:v{}:{}",
        template.id, template.version, category
    )
}

/// Appends the category's guidance block to the base body.
pub fn augment_content(base: &str, category: OccasionCategory) -> String {
    match category.augmentation() {
        Some(block) => format!("{}\n\n{}", base.trim_end(), block),
        None => base.to_string(),
    }
}

/// Returns the template variant for this request, reading through the cache.
/// Cache failures degrade to direct computation.
pub async fn resolve_content(
    cache: &dyn PromptCache,
    template: &TemplateRef,
    ctx: &RequestContext,
    ttl: Duration,
) -> String {
    let category = OccasionCategory::classify(&ctx.occasion);
    let key = cache_key(template, category);

    match cache.get(&key).await {
        Ok(Some(body)) => {
            debug!("Content cache hit: {key}");
            return body;
        }
        Ok(None) => debug!("Content cache miss: {key}"),
        Err(e) => warn!("Content cache read failed for {key}, computing directly: {e}"),
    }

    let body = augment_content(&template.content, category);

    if let Err(e) = cache.set(&key, &body, ttl).await {
        warn!("Content cache write failed for {key}: {e}");
    }
    body
}
