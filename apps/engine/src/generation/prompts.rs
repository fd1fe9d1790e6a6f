// Static prompt sections for the generation pipeline.
// Data-dependent sections (USER CONTEXT, MISSION) are built in assembler.rs.

/// Section 1: persona and required considerations.
pub const PERSONA_SYSTEM: &str = "You are an expert romantic experience designer and relationship \
    coach with deep knowledge of local venues, cultural traditions, and the small details that \
    make a date unforgettable. Every plan you create must account for:
- Cultural sensitivity and local customs
- The stated budget, with realistic costs
- Both partners' interests and personalities
- The current season and likely weather
- The couple's relationship stage and dynamics
- Physical and emotional safety at every step";

/// Section 4: the exact JSON schema the model must populate.
/// Downstream parsers rely on these key names; do not rename them.
pub const RESPONSE_FORMAT: &str = r#"RESPONSE FORMAT:
Respond with a single valid JSON object using EXACTLY this structure:
{
  "experience_title": "A short, evocative title for the experience",
  "main_concept": "Two or three sentences describing the heart of the experience",
  "detailed_plan": {
    "preparation": ["What to book, buy, or arrange in advance"],
    "timeline": [
      {"time": "7:00 PM", "activity": "What happens", "details": "Why it matters and how to do it well"}
    ],
    "surprise_elements": ["Small unexpected touches"],
    "backup_plans": ["What to do if weather, bookings, or energy levels change"]
  },
  "personalization_touches": ["Details tied to the couple's interests and history"],
  "budget_breakdown": {
    "essential_items": [{"item": "Dinner reservation", "estimated_cost": "$80"}],
    "optional_upgrades": [{"item": "Private dessert course", "estimated_cost": "$30"}]
  },
  "affiliate_recommendations": {
    "flowers": {"type": "Arrangement style", "occasion_note": "Why it fits", "price_range": "$40-60"},
    "dining": {"cuisine": "Cuisine type", "atmosphere": "Ambience to look for", "price_range": "$$"},
    "gifts": {"category": "Gift category", "suggestion": "Specific idea", "price_range": "$25-50"},
    "experiences": {"activity": "Bookable activity", "provider_type": "Kind of provider", "price_range": "$50-100"}
  },
  "success_tips": ["Practical advice for making the experience go smoothly"],
  "memorable_moments": ["Moments designed to become lasting memories"]
}"#;

/// Section 5: creativity and authenticity directives.
pub const QUALITY_GUIDELINES: &str = "QUALITY GUIDELINES:
- Be creative and specific: name the kind of place, the time, and the small gesture.
- Engage the senses: describe sounds, scents, textures, and tastes where they matter.
- Keep it authentic: the plan should feel like it was made for this couple, not copied from a list.
- Stay realistic about costs, travel time, and opening hours for the season.
- Build in emotional beats: anticipation, a shared highlight, and a warm ending.
- Offer alternatives so the plan still works if something falls through.";

/// Appended by the optimizer when the payload lacks a terminal sentence.
pub const CLOSING_DIRECTIVE: &str =
    "Respond only with the JSON object described above, filled in completely.";

pub const USER_CONTEXT_HEADER: &str = "USER CONTEXT:";
pub const MISSION_HEADER: &str = "MISSION:";

/// Fallback prompt. Replace: {occasion}, {budget}, {location}.
pub const FALLBACK_PROMPT_TEMPLATE: &str = r#"You are an expert romantic experience designer.

USER CONTEXT:
- Occasion: {occasion}
- Budget: {budget}
- Location: {location}

Create a personalized {occasion} experience in {location} for a {budget} budget.

RESPONSE FORMAT:
Return a JSON object with these keys:
{
  "experience_title": "Title",
  "main_concept": "Core concept",
  "detailed_plan": {
    "preparation": [],
    "timeline": [{"time": "", "activity": "", "details": ""}],
    "surprise_elements": [],
    "backup_plans": []
  },
  "personalization_touches": [],
  "budget_breakdown": {"essential_items": [], "optional_upgrades": []},
  "affiliate_recommendations": {"flowers": {}, "dining": {}, "gifts": {}, "experiences": {}},
  "success_tips": [],
  "memorable_moments": []
}"#;
