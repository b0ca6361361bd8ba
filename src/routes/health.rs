use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, String>,
    environment: String,
    version: String,
}

pub async fn health_check() -> impl Responder {
    let mut services = HashMap::new();

    // The engine never needs the credential to answer; report which mode
    // generation is running in.
    let ai_status = if env::var("GEMINI_API_KEY")
        .map(|key| !key.trim().is_empty())
        .unwrap_or(false)
    {
        "configured"
    } else {
        "offline fallback"
    };
    services.insert("ai_generation".to_string(), ai_status.to_string());

    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
