use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tripforge_api::routes;
use tripforge_api::services::ai_service::AiService;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let ai_service = Arc::new(AiService::from_env());

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(ai_service.clone()))
            .route("/", web::get().to(|| async { "Tripforge API is running" }))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api").service(
                    web::scope("/itinerary")
                        .route("/generate", web::post().to(routes::itinerary::generate))
                        .route(
                            "/generate-custom",
                            web::post().to(routes::itinerary::generate_custom),
                        )
                        .route(
                            "/regenerate",
                            web::post().to(routes::itinerary::regenerate),
                        ),
                ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
