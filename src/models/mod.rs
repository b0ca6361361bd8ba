pub mod itinerary;
pub mod trip;
