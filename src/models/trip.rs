use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Incoming trip request. Dates may arrive either as an explicit
/// start/end pair or as a free-form duration string ("5 days").
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub railway: Option<String>,
}

fn default_adults() -> u32 {
    1
}

impl TripRequest {
    pub fn party_size(&self) -> u32 {
        self.adults + self.children
    }

    /// Day count derived from the request, if it states one. An explicit
    /// date pair wins over the duration string; the duration string
    /// contributes its leading integer.
    pub fn derived_day_count(&self) -> Option<u32> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            let span = (end - start).num_days();
            if span >= 0 {
                return Some(span as u32 + 1);
            }
        }

        let duration = self.duration.as_deref()?;
        let digits: String = duration
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Where day 1 starts and the final day ends. Airport wins over
    /// railway; otherwise assume the destination's airport.
    pub fn departure_point(&self) -> String {
        if let Some(airport) = self.airport.as_deref().filter(|s| !s.trim().is_empty()) {
            return airport.to_string();
        }
        if let Some(railway) = self.railway.as_deref().filter(|s| !s.trim().is_empty()) {
            return railway.to_string();
        }
        format!("{} Airport", self.destination)
    }
}
