use serde_json::Value;

use crate::models::itinerary::{Activity, Day, EmergencyContacts, Itinerary};
use crate::models::trip::TripRequest;
use crate::services::ai_service::AiServiceError;
use crate::services::mock_itinerary_service::{
    hotel_drop, hotel_pickup, transport_drop, transport_pickup, MockItineraryService,
};

const MAX_ALTERNATIVES_PER_DAY: usize = 3;

/// Completes a parsed (possibly partial) model document into an itinerary
/// that satisfies the output schema and the bracketing invariant.
pub struct ItineraryNormalizer;

impl ItineraryNormalizer {
    pub fn normalize(
        document: Value,
        request: &TripRequest,
        synthesizer: &MockItineraryService,
    ) -> Result<Itinerary, AiServiceError> {
        let mut itinerary: Itinerary = serde_json::from_value(document).map_err(|err| {
            AiServiceError::Parse(format!("model document does not fit the schema: {}", err))
        })?;

        let day_count = synthesizer.day_count(request);

        if itinerary.destination.trim().is_empty() {
            itinerary.destination = request.destination.clone();
        }
        if itinerary.duration.trim().is_empty() {
            itinerary.duration = format!("{} days", day_count);
        }
        if itinerary.budget.trim().is_empty() {
            itinerary.budget = request
                .budget
                .clone()
                .unwrap_or_else(|| "Flexible".to_string());
        }
        if itinerary.total_travelers == 0 {
            itinerary.total_travelers = request.party_size();
        }
        if itinerary.children == 0 {
            itinerary.children = request.children;
        }
        if itinerary.start_date.trim().is_empty() {
            itinerary.start_date = request
                .start_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
        }
        if itinerary.end_date.trim().is_empty() {
            itinerary.end_date = request
                .end_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
        }

        if itinerary.days.is_empty() {
            itinerary.days = synthesizer.build_days(request);
        } else {
            apply_bracketing(&mut itinerary.days, request);
        }

        let departure = request.departure_point();
        if itinerary.transportation.flight.mode.trim().is_empty() {
            itinerary.transportation =
                synthesizer.transportation_defaults(&request.destination, &departure);
        }
        if itinerary.accommodation.budget.name.trim().is_empty() {
            itinerary.accommodation = synthesizer.accommodation_defaults(&request.destination);
        }
        if itinerary.tips.is_empty() {
            itinerary.tips = MockItineraryService::default_tips();
        }
        if itinerary.emergency_contacts.police.trim().is_empty() {
            itinerary.emergency_contacts = EmergencyContacts::national_defaults();
        }

        Ok(itinerary)
    }
}

fn mentions(activity: &Activity, needle: &str) -> bool {
    activity.title.to_lowercase().contains(needle)
        || activity.location.to_lowercase().contains(needle)
}

fn has_bracket(day: &Day, verb: &str, places: &[&str]) -> bool {
    day.activities
        .iter()
        .any(|a| mentions(a, verb) && places.iter().any(|p| mentions(a, p)))
}

/// Inserts the mandatory pickup/drop activities a model left out, without
/// duplicating ones already present.
fn apply_bracketing(days: &mut [Day], request: &TripRequest) {
    let departure = request.departure_point();
    let count = days.len();

    for (idx, day) in days.iter_mut().enumerate() {
        if day.day == 0 {
            day.day = idx as u32 + 1;
        }
        if day.city.trim().is_empty() {
            day.city = request.destination.clone();
        }
        if day.date.trim().is_empty() {
            day.date = format!("Day {}", day.day);
        }
        day.alternatives.truncate(MAX_ALTERNATIVES_PER_DAY);

        let first = idx == 0;
        let last = idx + 1 == count;

        if first {
            if !has_bracket(day, "pickup", &["airport", "station"]) {
                day.activities.insert(0, transport_pickup(&departure));
            }
        } else if !has_bracket(day, "pickup", &["hotel"]) {
            day.activities.insert(0, hotel_pickup());
        }

        if last {
            if !has_bracket(day, "drop", &["airport", "station"]) {
                day.activities.push(transport_drop(&departure));
            }
        } else if !has_bracket(day, "drop", &["hotel"]) {
            day.activities.push(hotel_drop());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::destination_catalog::DestinationCatalog;
    use serde_json::json;

    fn synthesizer() -> MockItineraryService {
        MockItineraryService::new(DestinationCatalog::new(), 15)
    }

    fn request() -> TripRequest {
        serde_json::from_value(json!({
            "destination": "Delhi",
            "duration": "2 days",
            "budget": "₹8000",
            "adults": 2,
            "children": 1,
        }))
        .unwrap()
    }

    #[test]
    fn test_fills_missing_top_level_fields() {
        let document = json!({
            "days": [
                { "day": 1, "activities": [{ "time": "10:00 AM", "title": "Red Fort Visit", "location": "Chandni Chowk" }] },
                { "day": 2, "activities": [{ "time": "10:00 AM", "title": "Qutub Minar", "location": "Mehrauli" }] }
            ]
        });

        let itinerary =
            ItineraryNormalizer::normalize(document, &request(), &synthesizer()).unwrap();
        assert_eq!(itinerary.destination, "Delhi");
        assert_eq!(itinerary.duration, "2 days");
        assert_eq!(itinerary.budget, "₹8000");
        assert_eq!(itinerary.total_travelers, 3);
        assert_eq!(itinerary.children, 1);
        assert_eq!(itinerary.tips.len(), 2);
        assert_eq!(itinerary.emergency_contacts.ambulance, "102");
        assert_eq!(itinerary.transportation.train.mode, "Train");
    }

    #[test]
    fn test_empty_days_delegates_to_synthesizer() {
        let document = json!({ "destination": "Delhi", "budget": "₹9999" });

        let itinerary =
            ItineraryNormalizer::normalize(document, &request(), &synthesizer()).unwrap();
        assert_eq!(itinerary.budget, "₹9999");
        assert_eq!(itinerary.days.len(), 2);
        assert!(itinerary.days[0].activities[0].title.starts_with("Pickup from"));
    }

    #[test]
    fn test_inserts_missing_brackets() {
        let document = json!({
            "days": [
                { "activities": [{ "time": "10:00 AM", "title": "Red Fort Visit", "location": "Chandni Chowk" }] },
                { "activities": [{ "time": "10:00 AM", "title": "Qutub Minar", "location": "Mehrauli" }] }
            ]
        });

        let itinerary =
            ItineraryNormalizer::normalize(document, &request(), &synthesizer()).unwrap();
        let first_day = &itinerary.days[0];
        let last_day = &itinerary.days[1];

        assert_eq!(first_day.day, 1);
        assert_eq!(first_day.activities[0].title, "Pickup from Delhi Airport");
        assert_eq!(first_day.activities.last().unwrap().title, "Hotel drop");
        assert_eq!(last_day.activities[0].title, "Hotel pickup");
        assert_eq!(last_day.activities.last().unwrap().title, "Drop to Delhi Airport");
    }

    #[test]
    fn test_existing_brackets_are_not_duplicated() {
        let document = json!({
            "days": [
                {
                    "day": 1,
                    "activities": [
                        { "time": "8:00 AM", "title": "Pickup from Delhi Airport", "location": "Delhi Airport" },
                        { "time": "11:00 AM", "title": "Red Fort Visit", "location": "Chandni Chowk" },
                        { "time": "6:00 PM", "title": "Drop to Delhi Airport", "location": "Delhi Airport" }
                    ]
                }
            ]
        });

        let itinerary =
            ItineraryNormalizer::normalize(document, &request(), &synthesizer()).unwrap();
        let day = &itinerary.days[0];
        let pickups = day
            .activities
            .iter()
            .filter(|a| a.title.to_lowercase().contains("pickup"))
            .count();
        let drops = day
            .activities
            .iter()
            .filter(|a| a.title.to_lowercase().contains("drop"))
            .count();
        assert_eq!(pickups, 1);
        assert_eq!(drops, 1);
        assert_eq!(day.activities.len(), 3);
    }

    #[test]
    fn test_mismatched_days_shape_is_a_parse_failure() {
        let document = json!({ "days": "none today" });
        let err =
            ItineraryNormalizer::normalize(document, &request(), &synthesizer()).unwrap_err();
        assert!(matches!(err, AiServiceError::Parse(_)));
    }

    #[test]
    fn test_alternatives_are_capped() {
        let document = json!({
            "days": [{
                "day": 1,
                "activities": [{ "time": "10:00 AM", "title": "Walk", "location": "Old Town" }],
                "alternatives": [
                    { "title": "A" }, { "title": "B" }, { "title": "C" }, { "title": "D" }, { "title": "E" }
                ]
            }]
        });

        let itinerary =
            ItineraryNormalizer::normalize(document, &request(), &synthesizer()).unwrap();
        assert_eq!(itinerary.days[0].alternatives.len(), 3);
    }
}
