use std::collections::HashSet;

use crate::models::itinerary::{
    AccommodationOption, AccommodationTiers, Activity, ActivityType, AlternativeActivity, Day,
    EmergencyContacts, GenerationStamp, Itinerary, TransportationOptions, TravelOption,
};
use crate::models::trip::TripRequest;
use crate::services::destination_catalog::{DestinationCatalog, DestinationTemplate, PoiSeed};

pub const DEFAULT_TRIP_DAYS: u32 = 3;
const MAX_ALTERNATIVES_PER_DAY: usize = 3;

/// The five content slots of a day, in time order. Each maps onto one of
/// the template's ranked pools; the late-night pool is only reached through
/// the combined-pool rescan.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Morning,
    LateMorning,
    Afternoon,
    LateAfternoon,
    Evening,
}

const SLOTS: [Slot; 5] = [
    Slot::Morning,
    Slot::LateMorning,
    Slot::Afternoon,
    Slot::LateAfternoon,
    Slot::Evening,
];

impl Slot {
    fn time(self) -> &'static str {
        match self {
            Slot::Morning => "9:00 AM",
            Slot::LateMorning => "11:30 AM",
            Slot::Afternoon => "1:30 PM",
            Slot::LateAfternoon => "4:00 PM",
            Slot::Evening => "7:30 PM",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Slot::Morning => "Morning",
            Slot::LateMorning => "Late Morning",
            Slot::Afternoon => "Afternoon",
            Slot::LateAfternoon => "Late Afternoon",
            Slot::Evening => "Evening",
        }
    }

    fn pool(self, template: &DestinationTemplate) -> &'static [PoiSeed] {
        match self {
            Slot::Morning | Slot::LateMorning => template.morning,
            Slot::Afternoon | Slot::LateAfternoon => template.afternoon,
            Slot::Evening => template.evening,
        }
    }
}

const THEMES: [&str; 4] = [
    "Heritage and Culture",
    "Local Flavours and Markets",
    "Nature and Adventure",
    "Art and Leisure",
];

/// Deterministic itinerary synthesizer. Produces a complete itinerary from
/// the destination catalog with no network calls; used when no AI credential
/// is configured or every generation attempt failed.
pub struct MockItineraryService {
    catalog: DestinationCatalog,
    max_trip_days: u32,
}

impl MockItineraryService {
    pub fn new(catalog: DestinationCatalog, max_trip_days: u32) -> Self {
        Self { catalog, max_trip_days }
    }

    /// Parsed day count clamped to the configured trip length; 3 when the
    /// request does not state one.
    pub fn day_count(&self, request: &TripRequest) -> u32 {
        request
            .derived_day_count()
            .map(|n| n.clamp(1, self.max_trip_days))
            .unwrap_or(DEFAULT_TRIP_DAYS)
    }

    pub fn synthesize(&self, request: &TripRequest, note: Option<String>) -> Itinerary {
        let count = self.day_count(request);
        let departure = request.departure_point();

        let end_date = match (request.start_date, request.end_date) {
            (_, Some(end)) => end.format("%Y-%m-%d").to_string(),
            (Some(start), None) => (start + chrono::Duration::days(i64::from(count) - 1))
                .format("%Y-%m-%d")
                .to_string(),
            (None, None) => String::new(),
        };

        Itinerary {
            destination: request.destination.clone(),
            duration: format!("{} days", count),
            budget: request
                .budget
                .clone()
                .unwrap_or_else(|| "Flexible".to_string()),
            total_travelers: request.party_size(),
            children: request.children,
            start_date: request
                .start_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            end_date,
            days: self.build_days(request),
            transportation: self.transportation_defaults(&request.destination, &departure),
            accommodation: self.accommodation_defaults(&request.destination),
            tips: Self::default_tips(),
            emergency_contacts: EmergencyContacts::national_defaults(),
            generation: Some(GenerationStamp::synthesized(note)),
        }
    }

    /// Day-by-day content only; also used by the normalizer when model
    /// output arrived without a usable `days` sequence.
    pub fn build_days(&self, request: &TripRequest) -> Vec<Day> {
        let count = self.day_count(request);
        let template = self.catalog.resolve(&request.destination);
        let departure = request.departure_point();
        let mut used: HashSet<String> = HashSet::new();

        (1..=count)
            .map(|day| self.build_day(request, template, day, count, &departure, &mut used))
            .collect()
    }

    fn build_day(
        &self,
        request: &TripRequest,
        template: &DestinationTemplate,
        day: u32,
        count: u32,
        departure: &str,
        used: &mut HashSet<String>,
    ) -> Day {
        let first = day == 1;
        let last = day == count;

        let mut activities = Vec::with_capacity(SLOTS.len() + 2);
        activities.push(if first {
            transport_pickup(departure)
        } else {
            hotel_pickup()
        });
        for slot in SLOTS {
            activities.push(self.pick_for_slot(template, slot, day, used, &request.destination));
        }
        activities.push(if last {
            transport_drop(departure)
        } else {
            hotel_drop()
        });

        let city = if template.city.is_empty() {
            request.destination.clone()
        } else {
            template.city.to_string()
        };

        Day {
            day,
            date: date_label(request, day),
            city: city.clone(),
            theme: theme_for(day, count),
            daily_budget: template.daily_budget.to_string(),
            highlights: template.highlights.iter().map(|h| h.to_string()).collect(),
            activities,
            alternatives: alternatives_for(template, &city),
        }
    }

    /// First unconsumed entry of the slot's ranked pool; on exhaustion the
    /// combined pools, and as a last resort a synthetic activity whose title
    /// embeds the day and slot so it can never collide.
    fn pick_for_slot(
        &self,
        template: &DestinationTemplate,
        slot: Slot,
        day: u32,
        used: &mut HashSet<String>,
        destination: &str,
    ) -> Activity {
        let seed = slot
            .pool(template)
            .iter()
            .find(|s| !used.contains(&poi_key(s)))
            .or_else(|| template.combined_pools().find(|s| !used.contains(&poi_key(s))));

        let activity = match seed {
            Some(seed) => seed_to_activity(seed, slot),
            None => generic_activity(slot, day, destination),
        };
        used.insert(activity.place_key());
        activity
    }

    pub fn transportation_defaults(
        &self,
        destination: &str,
        departure: &str,
    ) -> TransportationOptions {
        TransportationOptions {
            flight: TravelOption {
                mode: "Flight".to_string(),
                route: format!("Arrive {} via {}", destination, departure),
                description: "Economy return on the most frequent direct service".to_string(),
                estimated_cost: "₹4,500 per person".to_string(),
            },
            train: TravelOption {
                mode: "Train".to_string(),
                route: format!("Arrive {} by rail", destination),
                description: "3AC return on the fastest direct service".to_string(),
                estimated_cost: "₹1,400 per person".to_string(),
            },
        }
    }

    pub fn accommodation_defaults(&self, destination: &str) -> AccommodationTiers {
        AccommodationTiers {
            budget: AccommodationOption {
                name: format!("{} Backpackers Hostel", destination),
                area: "Near the city centre".to_string(),
                price_per_night: "₹800 per night".to_string(),
            },
            mid_range: AccommodationOption {
                name: format!("Hotel {} Residency", destination),
                area: "Close to the main sights".to_string(),
                price_per_night: "₹2,500 per night".to_string(),
            },
            luxury: AccommodationOption {
                name: format!("The {} Grand Resort", destination),
                area: "Prime location".to_string(),
                price_per_night: "₹7,500 per night".to_string(),
            },
        }
    }

    pub fn default_tips() -> Vec<String> {
        vec![
            "Keep digital and paper copies of your ID; monuments and hotels often ask for one."
                .to_string(),
            "Carry small notes for entry fees and street food; cards are not accepted everywhere."
                .to_string(),
        ]
    }
}

fn poi_key(seed: &PoiSeed) -> String {
    format!(
        "{}|{}",
        seed.title.trim().to_lowercase(),
        seed.location.trim().to_lowercase()
    )
}

fn seed_to_activity(seed: &PoiSeed, slot: Slot) -> Activity {
    Activity {
        time: slot.time().to_string(),
        title: seed.title.to_string(),
        activity_type: seed.activity_type,
        location: seed.location.to_string(),
        description: seed.description.to_string(),
        duration: seed.duration.to_string(),
        cost: seed.cost.to_string(),
    }
}

fn generic_activity(slot: Slot, day: u32, destination: &str) -> Activity {
    Activity {
        time: slot.time().to_string(),
        title: format!("Day {} {} Exploration", day, slot.label()),
        activity_type: ActivityType::Leisure,
        location: destination.to_string(),
        description: format!("Unscheduled time to wander {} at your own pace", destination),
        duration: "1.5 hours".to_string(),
        cost: "Free".to_string(),
    }
}

fn alternatives_for(template: &DestinationTemplate, city: &str) -> Vec<AlternativeActivity> {
    template
        .alternatives
        .iter()
        .take(MAX_ALTERNATIVES_PER_DAY)
        .map(|seed| AlternativeActivity {
            title: seed.title.to_string(),
            activity_type: seed.activity_type,
            description: if seed.description.is_empty() {
                Some(format!("{} near {}", seed.title, city))
            } else {
                Some(seed.description.to_string())
            },
        })
        .collect()
}

fn date_label(request: &TripRequest, day: u32) -> String {
    match request.start_date {
        Some(start) => (start + chrono::Duration::days(i64::from(day) - 1))
            .format("%Y-%m-%d")
            .to_string(),
        None => format!("Day {}", day),
    }
}

fn theme_for(day: u32, count: u32) -> String {
    if day == 1 {
        return "Arrival and Local Orientation".to_string();
    }
    if day == count {
        return "Final Highlights and Departure".to_string();
    }
    THEMES[(day as usize - 2) % THEMES.len()].to_string()
}

// Bracketing activities. These are the only permitted repeats in a
// synthesized itinerary. The normalizer reuses them when model output
// arrives without brackets.

pub fn transport_pickup(departure: &str) -> Activity {
    Activity {
        time: "8:00 AM".to_string(),
        title: format!("Pickup from {}", departure),
        activity_type: ActivityType::Transport,
        location: departure.to_string(),
        description: "Arrival transfer to your hotel".to_string(),
        duration: "1 hour".to_string(),
        cost: "Included".to_string(),
    }
}

pub fn transport_drop(departure: &str) -> Activity {
    Activity {
        time: "6:00 PM".to_string(),
        title: format!("Drop to {}", departure),
        activity_type: ActivityType::Transport,
        location: departure.to_string(),
        description: "Departure transfer from your hotel".to_string(),
        duration: "1 hour".to_string(),
        cost: "Included".to_string(),
    }
}

pub fn hotel_pickup() -> Activity {
    Activity {
        time: "8:30 AM".to_string(),
        title: "Hotel pickup".to_string(),
        activity_type: ActivityType::Transport,
        location: "Hotel lobby".to_string(),
        description: "Day transport reporting at the lobby".to_string(),
        duration: "30 minutes".to_string(),
        cost: "Included".to_string(),
    }
}

pub fn hotel_drop() -> Activity {
    Activity {
        time: "9:30 PM".to_string(),
        title: "Hotel drop".to_string(),
        activity_type: ActivityType::Transport,
        location: "Hotel lobby".to_string(),
        description: "Return transfer after the evening".to_string(),
        duration: "30 minutes".to_string(),
        cost: "Included".to_string(),
    }
}
