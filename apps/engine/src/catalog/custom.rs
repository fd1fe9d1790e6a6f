//! User-owned template creation. The one write path in the engine: invalid
//! content is rejected with the full validation result, never stored.

use tracing::{info, warn};
use uuid::Uuid;

use crate::context::validation::{validate_template_content, ValidationResult};
use crate::errors::EngineError;
use crate::models::template::{NewTemplateRequest, TemplateRef};
use crate::store::TemplateStore;

pub async fn create_custom_template(
    store: &dyn TemplateStore,
    owner_id: Uuid,
    request: NewTemplateRequest,
) -> Result<TemplateRef, EngineError> {
    if request.name.trim().is_empty() {
        return Err(EngineError::Validation(ValidationResult {
            is_valid: false,
            warnings: Vec::new(),
            errors: vec!["Template name must not be empty".to_string()],
        }));
    }

    let validation = validate_template_content(&request.content);
    if !validation.is_valid {
        info!(
            "Rejected custom template '{}' for owner {owner_id}: {}",
            request.name,
            validation.errors.join("; ")
        );
        return Err(EngineError::Validation(validation));
    }
    for warning in &validation.warnings {
        warn!("Custom template '{}': {warning}", request.name);
    }

    let template = store.insert_template(owner_id, request).await?;
    info!(
        "Created custom template {} ({}) for owner {owner_id}",
        template.id, template.template_type
    );
    Ok(template)
}
