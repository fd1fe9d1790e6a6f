use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::builder::BudgetTier;

/// A historical generated result that referenced a template.
///
/// Every attribute the aggregator reads is an explicit `Option`; records written
/// by older pipelines simply leave them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub id: Uuid,
    pub template_id: Uuid,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub budget: Option<BudgetTier>,
    /// User rating of the generated plan, 1–5.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Whether the user reported actually going on the date.
    #[serde(default)]
    pub executed: Option<bool>,
    #[serde(default)]
    pub generation_time_ms: Option<u64>,
    #[serde(default)]
    pub feedback: Vec<FeedbackRecord>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OutcomeRecord {
    pub fn new(template_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id,
            occasion: None,
            budget: None,
            rating: None,
            executed: None,
            generation_time_ms: None,
            feedback: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
