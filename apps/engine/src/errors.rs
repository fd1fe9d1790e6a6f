use thiserror::Error;

use crate::cache::CacheError;
use crate::context::validation::ValidationResult;
use crate::store::StoreError;

/// Engine-level error type.
///
/// Only template creation and id-based lookups surface these to callers;
/// the generation path converts every failure into the fallback prompt.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template validation failed: {}", .0.errors.join("; "))]
    Validation(ValidationResult),

    #[error("Personalization failed: {0}")]
    Personalization(String),

    #[error("Prompt assembly failed: {0}")]
    Assembly(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Stable machine-readable code for callers that serialize errors.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::NotFound(_) => "NOT_FOUND",
            EngineError::Validation(_) => "VALIDATION_ERROR",
            EngineError::Personalization(_) => "PERSONALIZATION_ERROR",
            EngineError::Assembly(_) => "ASSEMBLY_ERROR",
            EngineError::Store(_) => "STORE_ERROR",
            EngineError::Cache(_) => "CACHE_ERROR",
            EngineError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
