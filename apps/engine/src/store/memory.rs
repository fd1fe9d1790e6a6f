use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{StoreError, TemplateStore};
use crate::models::outcome::OutcomeRecord;
use crate::models::template::{NewTemplateRequest, TemplateRef, CUSTOM_TEMPLATE_TYPE};

/// In-process template store. Insertion order is preserved for listing.
#[derive(Default)]
pub struct MemoryTemplateStore {
    templates: RwLock<Vec<TemplateRef>>,
    outcomes: RwLock<HashMap<Uuid, Vec<OutcomeRecord>>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: Vec<TemplateRef>) -> Self {
        Self {
            templates: RwLock::new(templates),
            outcomes: RwLock::new(HashMap::new()),
        }
    }

    pub async fn record_outcome(&self, record: OutcomeRecord) {
        self.outcomes
            .write()
            .await
            .entry(record.template_id)
            .or_default()
            .push(record);
    }

    /// Replaces a template's body. Every edit bumps `version` by one so cached
    /// bodies for the old version are never served again.
    pub async fn update_content(&self, id: Uuid, content: &str) -> Result<TemplateRef, StoreError> {
        let mut templates = self.templates.write().await;
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::Conflict(format!("Template {id} does not exist")))?;
        template.content = content.to_string();
        template.version += 1;
        template.updated_at = Utc::now();
        info!("Template {id} content updated to version {}", template.version);
        Ok(template.clone())
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn get_template(&self, id: Uuid) -> Result<Option<TemplateRef>, StoreError> {
        Ok(self.templates.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn find_active_by_types(&self, types: &[&str]) -> Result<Vec<TemplateRef>, StoreError> {
        Ok(self
            .templates
            .read()
            .await
            .iter()
            .filter(|t| t.is_active && types.contains(&t.template_type.as_str()))
            .cloned()
            .collect())
    }

    async fn active_templates(&self, limit: usize) -> Result<Vec<TemplateRef>, StoreError> {
        Ok(self
            .templates
            .read()
            .await
            .iter()
            .filter(|t| t.is_active)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_template(
        &self,
        owner_id: Uuid,
        request: NewTemplateRequest,
    ) -> Result<TemplateRef, StoreError> {
        let mut templates = self.templates.write().await;
        if templates
            .iter()
            .any(|t| t.owner_id == Some(owner_id) && t.name == request.name)
        {
            return Err(StoreError::Conflict(format!(
                "Template '{}' already exists for this owner",
                request.name
            )));
        }

        let mut template = TemplateRef::new(
            request.name,
            request.content,
            request
                .template_type
                .unwrap_or_else(|| CUSTOM_TEMPLATE_TYPE.to_string()),
        );
        template.description = request.description;
        template.is_premium = request.is_premium.unwrap_or(false);
        template.owner_id = Some(owner_id);
        templates.push(template.clone());
        Ok(template)
    }

    async fn outcomes_for(&self, template_id: Uuid) -> Result<Vec<OutcomeRecord>, StoreError> {
        Ok(self
            .outcomes
            .read()
            .await
            .get(&template_id)
            .cloned()
            .unwrap_or_default())
    }
}
