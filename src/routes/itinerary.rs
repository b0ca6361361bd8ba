use crate::models::trip::TripRequest;
use crate::services::ai_service::{AiService, AiServiceError};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomGenerationRequest {
    pub trip_details: TripRequest,
    #[serde(default)]
    pub customizations: Option<serde_json::Map<String, Value>>,
}

/*
    /api/itinerary/generate
*/
pub async fn generate(
    data: web::Data<Arc<AiService>>,
    input: web::Json<TripRequest>,
) -> impl Responder {
    let service = data.into_inner();

    match service.generate_itinerary(&input.into_inner(), None).await {
        Ok(itinerary) => HttpResponse::Ok().json(json!({ "success": true, "data": itinerary })),
        Err(err) => error_response(err),
    }
}

/*
    /api/itinerary/generate-custom
*/
pub async fn generate_custom(
    data: web::Data<Arc<AiService>>,
    input: web::Json<CustomGenerationRequest>,
) -> impl Responder {
    let service = data.into_inner();
    let body = input.into_inner();

    match service
        .generate_itinerary(&body.trip_details, body.customizations.as_ref())
        .await
    {
        Ok(itinerary) => HttpResponse::Ok().json(json!({ "success": true, "data": itinerary })),
        Err(err) => error_response(err),
    }
}

/*
    /api/itinerary/regenerate
*/
pub async fn regenerate(
    data: web::Data<Arc<AiService>>,
    input: web::Json<TripRequest>,
) -> impl Responder {
    let service = data.into_inner();

    match service.generate_itinerary(&input.into_inner(), None).await {
        Ok(itinerary) => HttpResponse::Ok().json(json!({ "success": true, "data": itinerary })),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AiServiceError) -> HttpResponse {
    eprintln!("Itinerary generation error: {}", err);

    match &err {
        AiServiceError::Validation(msg) => {
            HttpResponse::BadRequest().json(json!({ "success": false, "message": msg }))
        }
        AiServiceError::Timeout => HttpResponse::GatewayTimeout().json(json!({
            "success": false,
            "message": "The AI provider did not respond in time."
        })),
        AiServiceError::Authorization(_) | AiServiceError::CapabilityUnavailable(_) => {
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "API key issue detected. Please verify your Gemini API key is valid and the API is enabled.",
                "error": err.to_string()
            }))
        }
        AiServiceError::Configuration(_) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "AI service is not configured. Please set GEMINI_API_KEY.",
            "error": err.to_string()
        })),
        _ => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to generate itinerary",
            "error": err.to_string()
        })),
    }
}
