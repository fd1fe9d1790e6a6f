//! Context Builder: normalizes loosely-structured request data into a `RequestContext`.
//!
//! Every field has a deterministic default. Building a context never fails:
//! missing keys, wrong JSON types and unknown budget strings all fall back.

use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_OCCASION: &str = "date_night";
pub const DEFAULT_TIME_OF_DAY: &str = "evening";
pub const DEFAULT_DURATION: &str = "2-4 hours";

// ────────────────────────────────────────────────────────────────────────────
// Budget tier
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    #[default]
    Moderate,
    High,
    Unlimited,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 4] = [
        BudgetTier::Low,
        BudgetTier::Moderate,
        BudgetTier::High,
        BudgetTier::Unlimited,
    ];

    /// Case-insensitive parse. Returns `None` for anything outside the four tiers.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(BudgetTier::Low),
            "moderate" => Some(BudgetTier::Moderate),
            "high" => Some(BudgetTier::High),
            "unlimited" => Some(BudgetTier::Unlimited),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Moderate => "moderate",
            BudgetTier::High => "high",
            BudgetTier::Unlimited => "unlimited",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Season
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Maps a calendar month (1–12) to its season band. Out-of-range months
    /// are treated as December.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// Fixed sentence describing the weather and activity bias for the band.
    pub fn description(&self) -> &'static str {
        match self {
            Season::Winter => {
                "Winter - cozy indoor activities, warm drinks, holiday themes, and intimate settings"
            }
            Season::Spring => {
                "Spring - fresh blooms, outdoor picnics, garden visits, and renewal themes"
            }
            Season::Summer => {
                "Summer - outdoor adventures, beach activities, long evenings, and festivals"
            }
            Season::Autumn => {
                "Autumn - harvest festivals, colorful foliage walks, cozy cafes, and warm comfort food"
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RequestContext
// ────────────────────────────────────────────────────────────────────────────

/// Immutable per-request personalization context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestContext {
    pub location: String,
    pub budget: BudgetTier,
    pub personality: String,
    pub occasion: String,
    pub season: Season,
    pub relationship_stage: Option<String>,
    pub partner_interests: Option<String>,
    pub user_interests: Option<String>,
    pub special_requirements: Option<String>,
    pub custom_preferences: Map<String, Value>,
    pub weather: Option<String>,
    pub time_of_day: String,
    pub duration: String,
}

impl RequestContext {
    /// Builds a context using today's date for the season band.
    pub fn build(user_data: &Value, occasion_override: Option<&str>) -> Self {
        Self::build_at(user_data, occasion_override, Utc::now().date_naive())
    }

    /// Builds a context as of `today`. Unrecognized keys are ignored.
    pub fn build_at(user_data: &Value, occasion_override: Option<&str>, today: NaiveDate) -> Self {
        let location = text_field(user_data, "location_city")
            .or_else(|| text_field(user_data, "location_type"))
            .unwrap_or_default();

        let budget = text_field(user_data, "budget")
            .and_then(|b| BudgetTier::parse(&b))
            .unwrap_or_default();

        let partner_interests = text_field(user_data, "partner_interests");
        let user_interests = text_field(user_data, "user_interests");
        let personality = personality_summary(
            text_field(user_data, "personality_type").as_deref(),
            partner_interests.as_deref(),
            user_interests.as_deref(),
        );

        let occasion = occasion_override
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .or_else(|| text_field(user_data, "occasion"))
            .unwrap_or_else(|| DEFAULT_OCCASION.to_string());

        let custom_preferences = user_data
            .get("custom_preferences")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self {
            location,
            budget,
            personality,
            occasion,
            season: Season::from_month(today.month()),
            relationship_stage: text_field(user_data, "relationship_stage"),
            partner_interests,
            user_interests,
            special_requirements: text_field(user_data, "special_requirements"),
            custom_preferences,
            weather: text_field(user_data, "weather"),
            time_of_day: text_field(user_data, "time_preference")
                .unwrap_or_else(|| DEFAULT_TIME_OF_DAY.to_string()),
            duration: text_field(user_data, "duration")
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        }
    }

    /// `key: value` pairs of the custom preferences, in key order.
    pub fn custom_preferences_text(&self) -> String {
        let mut keys: Vec<&String> = self.custom_preferences.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|k| format!("{}: {}", k, value_text(&self.custom_preferences[k.as_str()])))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// String value of a recognized placeholder name, or `None` when the name
    /// is outside the closed vocabulary. Unset optional fields map to "".
    pub fn placeholder_value(&self, name: &str) -> Option<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let value = match name {
            "location" => self.location.clone(),
            "budget" => self.budget.as_str().to_string(),
            "personality" => self.personality.clone(),
            "occasion" => self.occasion.clone(),
            "season" => self.season.description().to_string(),
            "relationship_stage" => opt(&self.relationship_stage),
            "partner_interests" => opt(&self.partner_interests),
            "user_interests" => opt(&self.user_interests),
            "special_requirements" => opt(&self.special_requirements),
            "custom_preferences" => self.custom_preferences_text(),
            "weather" => opt(&self.weather),
            "time_of_day" => self.time_of_day.clone(),
            "duration" => self.duration.clone(),
            _ => return None,
        };
        Some(value)
    }
}

/// Joins the non-empty personality parts with "; ".
fn personality_summary(
    personality_type: Option<&str>,
    partner_interests: Option<&str>,
    user_interests: Option<&str>,
) -> String {
    let parts = [
        personality_type.map(|p| format!("Personality: {p}")),
        partner_interests.map(|p| format!("Partner enjoys: {p}")),
        user_interests.map(|u| format!("User enjoys: {u}")),
    ];
    parts.into_iter().flatten().collect::<Vec<_>>().join("; ")
}

/// Non-empty, trimmed string value for `key`. Non-string JSON values are ignored.
fn text_field(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
