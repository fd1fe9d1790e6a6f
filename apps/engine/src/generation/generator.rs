//! Prompt generation: orchestrates the full pipeline behind a fallback boundary.
//!
//! Flow: build context → resolve content (cache-or-compute) → personalize →
//!       assemble sections → optimize → final string.
//!
//! Any stage error is logged and replaced by the fallback prompt. Callers of
//! `generate_prompt` never observe a failure.

use serde_json::Value;
use tracing::{info, warn};

use crate::cache::PromptCache;
use crate::config::EngineConfig;
use crate::context::builder::RequestContext;
use crate::errors::EngineError;
use crate::generation::assembler::assemble_prompt;
use crate::generation::fallback::fallback_prompt;
use crate::generation::optimizer::optimize_prompt;
use crate::generation::personalizer::Personalize;
use crate::generation::resolver::resolve_content;
use crate::models::template::TemplateRef;

pub async fn generate_prompt(
    cache: &dyn PromptCache,
    personalizer: &dyn Personalize,
    config: &EngineConfig,
    template: &TemplateRef,
    user_data: &Value,
    occasion_override: Option<&str>,
) -> String {
    match run_pipeline(
        cache,
        personalizer,
        config,
        template,
        user_data,
        occasion_override,
    )
    .await
    {
        Ok(prompt) => {
            info!(
                "Generated prompt from template {} v{} ({} chars)",
                template.id,
                template.version,
                prompt.len()
            );
            prompt
        }
        Err(e) => {
            warn!(
                "Prompt pipeline failed for template {} [{}]: {e}, using fallback prompt",
                template.id,
                e.code()
            );
            fallback_prompt(user_data, occasion_override)
        }
    }
}

async fn run_pipeline(
    cache: &dyn PromptCache,
    personalizer: &dyn Personalize,
    config: &EngineConfig,
    template: &TemplateRef,
    user_data: &Value,
    occasion_override: Option<&str>,
) -> Result<String, EngineError> {
    // Step 1: Context (never fails)
    let ctx = RequestContext::build(user_data, occasion_override);

    // Step 2: Template variant, through the cache. A blank base body is an
    // error even when the occasion would add a guidance block.
    if template.content.trim().is_empty() {
        return Err(EngineError::Assembly(format!(
            "template {} has an empty body",
            template.id
        )));
    }
    let body = resolve_content(cache, template, &ctx, config.cache_ttl).await;

    // Step 3: Placeholder substitution
    let personalized = personalizer.personalize(&body, &ctx)?;

    // Step 4 + 5: Sections, then whitespace and closing directive
    Ok(optimize_prompt(&assemble_prompt(&ctx, &personalized)))
}
