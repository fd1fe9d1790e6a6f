//! Template store collaborator: the read/write surface this crate needs from
//! the storage layer. Persistence itself lives outside the engine.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::outcome::OutcomeRecord;
use crate::models::template::{NewTemplateRequest, TemplateRef};

pub use self::memory::MemoryTemplateStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Template store unavailable: {0}")]
    Unavailable(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn get_template(&self, id: Uuid) -> Result<Option<TemplateRef>, StoreError>;

    /// Active templates whose `template_type` is one of `types`, in no particular order.
    async fn find_active_by_types(&self, types: &[&str]) -> Result<Vec<TemplateRef>, StoreError>;

    /// Up to `limit` active templates, unfiltered.
    async fn active_templates(&self, limit: usize) -> Result<Vec<TemplateRef>, StoreError>;

    async fn insert_template(
        &self,
        owner_id: Uuid,
        request: NewTemplateRequest,
    ) -> Result<TemplateRef, StoreError>;

    /// All outcome records that reference `template_id`.
    async fn outcomes_for(&self, template_id: Uuid) -> Result<Vec<OutcomeRecord>, StoreError>;
}
