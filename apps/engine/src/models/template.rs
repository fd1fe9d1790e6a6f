use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable prompt template as supplied by the storage layer.
///
/// `version` is bumped by the store on every content edit and is the only thing
/// the content cache keys on besides the id. `updated_at` is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    pub template_type: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default = "default_version")]
    pub version: u64,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub occasion_tags: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_version() -> u64 {
    1
}

impl TemplateRef {
    /// Builds a fresh, active, version-1 template. Used by stores when inserting.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        template_type: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            content: content.into(),
            template_type: template_type.into(),
            is_active: true,
            is_premium: false,
            version: 1,
            usage_count: 0,
            average_rating: 0.0,
            occasion_tags: Vec::new(),
            tags: Vec::new(),
            owner_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating a user-owned template.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplateRequest {
    pub name: String,
    pub content: String,
    #[serde(default, rename = "type")]
    pub template_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_premium: Option<bool>,
}

/// Template type assigned to user-created templates when none is given.
pub const CUSTOM_TEMPLATE_TYPE: &str = "custom";
