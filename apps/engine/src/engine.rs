use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::analytics::{self, AnalyticsOutcome};
use crate::cache::PromptCache;
use crate::catalog::{custom, suggestions};
use crate::config::EngineConfig;
use crate::context::validation::{self, ValidationResult};
use crate::errors::EngineError;
use crate::generation::generator;
use crate::generation::personalizer::{Personalize, PlaceholderPersonalizer};
use crate::models::template::{NewTemplateRequest, TemplateRef};
use crate::store::TemplateStore;

/// The prompt engine service object. Construct once at startup and share by
/// reference or clone; it holds no mutable state beyond its collaborators.
#[derive(Clone)]
pub struct PromptEngine {
    store: Arc<dyn TemplateStore>,
    cache: Arc<dyn PromptCache>,
    /// Pluggable personalizer. Default: `PlaceholderPersonalizer`.
    personalizer: Arc<dyn Personalize>,
    config: EngineConfig,
}

impl PromptEngine {
    pub fn new(
        store: Arc<dyn TemplateStore>,
        cache: Arc<dyn PromptCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            cache,
            personalizer: Arc::new(PlaceholderPersonalizer),
            config,
        }
    }

    pub fn with_personalizer(mut self, personalizer: Arc<dyn Personalize>) -> Self {
        self.personalizer = personalizer;
        self
    }

    /// Builds the final prompt for `template`. Never fails: pipeline errors
    /// yield the fallback prompt.
    pub async fn generate_prompt(
        &self,
        template: &TemplateRef,
        user_data: &Value,
        occasion_override: Option<&str>,
    ) -> String {
        generator::generate_prompt(
            self.cache.as_ref(),
            self.personalizer.as_ref(),
            &self.config,
            template,
            user_data,
            occasion_override,
        )
        .await
    }

    /// Looks the template up first. Unknown or inactive ids are `NotFound`.
    pub async fn generate_prompt_for(
        &self,
        template_id: Uuid,
        user_data: &Value,
        occasion_override: Option<&str>,
    ) -> Result<String, EngineError> {
        let template = self
            .store
            .get_template(template_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| EngineError::NotFound(format!("Template {template_id} not found")))?;
        Ok(self
            .generate_prompt(&template, user_data, occasion_override)
            .await)
    }

    pub async fn get_template_suggestions(&self, user_data: &Value) -> Vec<TemplateRef> {
        suggestions::get_template_suggestions(self.store.as_ref(), user_data).await
    }

    pub fn validate_template_content(&self, content: &str) -> ValidationResult {
        validation::validate_template_content(content)
    }

    pub async fn create_custom_template(
        &self,
        owner_id: Uuid,
        request: NewTemplateRequest,
    ) -> Result<TemplateRef, EngineError> {
        custom::create_custom_template(self.store.as_ref(), owner_id, request).await
    }

    pub async fn get_template_analytics(&self, template_id: Uuid) -> AnalyticsOutcome {
        analytics::get_template_analytics(self.store.as_ref(), template_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::context::builder::RequestContext;
    use crate::store::MemoryTemplateStore;
    use serde_json::json;

    const BODY: &str = "Design a {{occasion}} in {{location}} for a {{budget}} budget. \
        Lean into small rituals, shared playlists, and one unexpected gesture.";

    fn engine_with(store: Arc<MemoryTemplateStore>) -> PromptEngine {
        PromptEngine::new(store, Arc::new(MemoryCache::new(64)), EngineConfig::default())
    }

    struct Refusing;

    impl Personalize for Refusing {
        fn personalize(&self, _: &str, _: &RequestContext) -> Result<String, EngineError> {
            Err(EngineError::Personalization("refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_generate_prompt_for_known_template() {
        let template = TemplateRef::new("Evening", BODY, "romantic");
        let id = template.id;
        let engine = engine_with(Arc::new(MemoryTemplateStore::with_templates(vec![template])));

        let prompt = engine
            .generate_prompt_for(id, &json!({"location_city": "Vienna"}), None)
            .await
            .unwrap();
        assert!(prompt.contains("Design a date_night in Vienna for a moderate budget."));
    }

    #[tokio::test]
    async fn test_generate_prompt_for_unknown_or_inactive_is_not_found() {
        let mut inactive = TemplateRef::new("Retired", BODY, "romantic");
        inactive.is_active = false;
        let inactive_id = inactive.id;
        let engine = engine_with(Arc::new(MemoryTemplateStore::with_templates(vec![inactive])));

        let err = engine
            .generate_prompt_for(Uuid::new_v4(), &json!({}), None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(engine
            .generate_prompt_for(inactive_id, &json!({}), None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_edit_produces_fresh_prompt() {
        let template = TemplateRef::new("Evening", BODY, "romantic");
        let id = template.id;
        let store = Arc::new(MemoryTemplateStore::with_templates(vec![template]));
        let engine = engine_with(store.clone());

        let before = engine.generate_prompt_for(id, &json!({}), None).await.unwrap();
        store
            .update_content(id, "A brand new {{occasion}} plan for {{location}} on {{budget}}.")
            .await
            .unwrap();
        let after = engine.generate_prompt_for(id, &json!({}), None).await.unwrap();

        assert!(before.contains("small rituals"));
        assert!(!after.contains("small rituals"));
        assert!(after.contains("A brand new date_night plan"));
    }

    #[tokio::test]
    async fn test_injected_personalizer_failure_falls_back() {
        let template = TemplateRef::new("Evening", BODY, "romantic");
        let engine = engine_with(Arc::new(MemoryTemplateStore::new()))
            .with_personalizer(Arc::new(Refusing));

        let prompt = engine.generate_prompt(&template, &json!({}), None).await;
        assert!(prompt.contains("date night"));
        assert!(prompt.contains("moderate"));
        assert!(prompt.contains("your city"));
    }

    #[tokio::test]
    async fn test_concurrent_generation_is_consistent() {
        let template = TemplateRef::new("Evening", BODY, "romantic");
        let engine = engine_with(Arc::new(MemoryTemplateStore::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                let template = template.clone();
                tokio::spawn(async move {
                    engine
                        .generate_prompt(&template, &json!({"budget": "high"}), Some("anniversary"))
                        .await
                })
            })
            .collect();

        let mut outputs = Vec::new();
        for handle in handles {
            outputs.push(handle.await.unwrap());
        }
        assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_create_then_suggest_then_analytics() {
        let engine = engine_with(Arc::new(MemoryTemplateStore::new()));
        let owner = Uuid::new_v4();
        let created = engine
            .create_custom_template(
                owner,
                NewTemplateRequest {
                    name: "Bookshop crawl".to_string(),
                    content: format!("{BODY} Finish with a quiet reading hour."),
                    template_type: Some("casual".to_string()),
                    description: None,
                    is_premium: None,
                },
            )
            .await
            .unwrap();

        let suggested = engine.get_template_suggestions(&json!({"budget": "low"})).await;
        assert_eq!(suggested.len(), 1);
        assert_eq!(suggested[0].id, created.id);

        let AnalyticsOutcome::Summary(summary) = engine.get_template_analytics(created.id).await
        else {
            panic!("expected summary");
        };
        assert_eq!(summary.success_rate, 0.0);
        assert!(engine.validate_template_content(BODY).is_valid);
    }
}
