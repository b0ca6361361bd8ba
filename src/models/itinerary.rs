use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Food,
    Transport,
    Accommodation,
    Sightseeing,
    Shopping,
    Entertainment,
    Adventure,
    Cultural,
    Wellness,
    Nature,
    Leisure,
    // Model output is not reliable about the type vocabulary; anything
    // unrecognised lands on the generic variant.
    #[default]
    #[serde(other)]
    Activity,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    pub time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub location: String,
    #[serde(alias = "notes")]
    pub description: String,
    pub duration: String,
    pub cost: String,
}

impl Activity {
    /// Case-insensitive identity used by the no-repeat invariant.
    pub fn place_key(&self) -> String {
        format!(
            "{}|{}",
            self.title.trim().to_lowercase(),
            self.location.trim().to_lowercase()
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AlternativeActivity {
    pub title: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[serde(alias = "notes", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Day {
    pub day: u32,
    pub date: String,
    pub city: String,
    pub theme: String,
    pub daily_budget: String,
    pub highlights: Vec<String>,
    pub activities: Vec<Activity>,
    pub alternatives: Vec<AlternativeActivity>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelOption {
    pub mode: String,
    pub route: String,
    pub description: String,
    pub estimated_cost: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportationOptions {
    pub flight: TravelOption,
    pub train: TravelOption,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AccommodationOption {
    pub name: String,
    pub area: String,
    pub price_per_night: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AccommodationTiers {
    pub budget: AccommodationOption,
    pub mid_range: AccommodationOption,
    pub luxury: AccommodationOption,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContacts {
    pub police: String,
    pub ambulance: String,
    pub tourist_helpline: String,
}

impl EmergencyContacts {
    pub fn national_defaults() -> Self {
        Self {
            police: "100".to_string(),
            ambulance: "102".to_string(),
            tourist_helpline: "1363".to_string(),
        }
    }
}

/// Provenance stamp so callers and tests can tell AI-derived output from
/// synthesized output without inspecting the day content.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStamp {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub generation_id: String,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl GenerationStamp {
    pub const SOURCE_AI: &'static str = "ai";
    pub const SOURCE_SYNTHESIZED: &'static str = "synthesized";

    pub fn ai(model: &str, method: &str) -> Self {
        Self {
            source: Self::SOURCE_AI.to_string(),
            model_used: Some(model.to_string()),
            method: Some(method.to_string()),
            generation_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            note: None,
        }
    }

    pub fn synthesized(note: Option<String>) -> Self {
        Self {
            source: Self::SOURCE_SYNTHESIZED.to_string(),
            model_used: None,
            method: None,
            generation_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            note,
        }
    }
}

/// The engine's sole output type, whether AI-derived or synthesized.
/// Every field is serde-defaulted so partial model output deserializes
/// and gets completed by the normalizer.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Itinerary {
    pub destination: String,
    pub duration: String,
    pub budget: String,
    pub total_travelers: u32,
    pub children: u32,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<Day>,
    pub transportation: TransportationOptions,
    pub accommodation: AccommodationTiers,
    pub tips: Vec<String>,
    pub emergency_contacts: EmergencyContacts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationStamp>,
}
