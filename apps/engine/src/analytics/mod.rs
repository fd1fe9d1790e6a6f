//! Analytics Aggregator: success and engagement statistics for one template,
//! computed from its historical outcome records.
//!
//! Lookup failures are returned as values (`AnalyticsOutcome::Error`), never raised.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::context::builder::BudgetTier;
use crate::models::outcome::OutcomeRecord;
use crate::models::template::TemplateRef;
use crate::store::TemplateStore;

/// Only the most recent records are sampled for occasion frequencies.
const OCCASION_SAMPLE_SIZE: usize = 100;
const TOP_OCCASIONS: usize = 5;
const POSITIVE_RATING: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccasionCount {
    pub occasion: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub average_rating: f64,
    pub total_feedback: usize,
    /// Share of feedback rated 4 or higher, 0.0–1.0.
    pub positive_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub template_id: Uuid,
    pub total_uses: u64,
    pub average_rating: f64,
    /// 0–100
    pub success_rate: f64,
    pub popular_occasions: Vec<OccasionCount>,
    pub budget_distribution: BTreeMap<BudgetTier, usize>,
    pub feedback_summary: FeedbackSummary,
    pub average_generation_time_ms: f64,
    /// 0–100
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticsError {
    #[serde(rename = "not found")]
    NotFound,
    #[serde(rename = "unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyticsOutcome {
    Summary(AnalyticsSummary),
    Error { error: AnalyticsError },
}

pub async fn get_template_analytics(
    store: &dyn TemplateStore,
    template_id: Uuid,
) -> AnalyticsOutcome {
    let template = match store.get_template(template_id).await {
        Ok(Some(t)) => t,
        Ok(None) => {
            info!("Analytics requested for unknown template {template_id}");
            return AnalyticsOutcome::Error {
                error: AnalyticsError::NotFound,
            };
        }
        Err(e) => {
            error!("Analytics template lookup failed for {template_id}: {e}");
            return AnalyticsOutcome::Error {
                error: AnalyticsError::Unavailable,
            };
        }
    };

    match store.outcomes_for(template_id).await {
        Ok(records) => AnalyticsOutcome::Summary(summarize(&template, &records)),
        Err(e) => {
            error!("Outcome records unavailable for template {template_id}: {e}");
            AnalyticsOutcome::Error {
                error: AnalyticsError::Unavailable,
            }
        }
    }
}

/// Pure aggregation over already-loaded records.
pub fn summarize(template: &TemplateRef, records: &[OutcomeRecord]) -> AnalyticsSummary {
    let total = records.len();

    let successful = records
        .iter()
        .filter(|r| r.rating.is_some_and(|v| v >= POSITIVE_RATING) || r.executed == Some(true))
        .count();
    let executed = records.iter().filter(|r| r.executed == Some(true)).count();

    let timings: Vec<u64> = records.iter().filter_map(|r| r.generation_time_ms).collect();
    let average_generation_time_ms = if timings.is_empty() {
        0.0
    } else {
        round2(timings.iter().sum::<u64>() as f64 / timings.len() as f64)
    };

    AnalyticsSummary {
        template_id: template.id,
        total_uses: template.usage_count,
        average_rating: round2(template.average_rating),
        success_rate: percentage(successful, total),
        popular_occasions: popular_occasions(records),
        budget_distribution: budget_distribution(records),
        feedback_summary: feedback_summary(records),
        average_generation_time_ms,
        completion_rate: percentage(executed, total),
    }
}

fn popular_occasions(records: &[OutcomeRecord]) -> Vec<OccasionCount> {
    let mut recent: Vec<&OutcomeRecord> = records.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in recent.into_iter().take(OCCASION_SAMPLE_SIZE) {
        if let Some(occasion) = record.occasion.as_deref().filter(|o| !o.is_empty()) {
            *counts.entry(occasion).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<OccasionCount> = counts
        .into_iter()
        .map(|(occasion, count)| OccasionCount {
            occasion: occasion.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.occasion.cmp(&b.occasion)));
    ranked.truncate(TOP_OCCASIONS);
    ranked
}

fn budget_distribution(records: &[OutcomeRecord]) -> BTreeMap<BudgetTier, usize> {
    let mut distribution: BTreeMap<BudgetTier, usize> =
        BudgetTier::ALL.iter().map(|tier| (*tier, 0)).collect();
    for budget in records.iter().filter_map(|r| r.budget) {
        *distribution.entry(budget).or_insert(0) += 1;
    }
    distribution
}

fn feedback_summary(records: &[OutcomeRecord]) -> FeedbackSummary {
    let ratings: Vec<u8> = records
        .iter()
        .flat_map(|r| r.feedback.iter().map(|f| f.rating))
        .collect();
    if ratings.is_empty() {
        return FeedbackSummary {
            average_rating: 0.0,
            total_feedback: 0,
            positive_ratio: 0.0,
        };
    }

    let total = ratings.len();
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let positive = ratings.iter().filter(|&&r| r >= POSITIVE_RATING).count();
    FeedbackSummary {
        average_rating: round2(sum as f64 / total as f64),
        total_feedback: total,
        positive_ratio: round2(positive as f64 / total as f64),
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
