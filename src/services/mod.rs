pub mod ai_service;
pub mod destination_catalog;
pub mod itinerary_normalizer;
pub mod mock_itinerary_service;
pub mod model_resolver;
pub mod response_parser;
