use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use std::sync::Arc;

use tripforge_api::routes;
use tripforge_api::services::ai_service::{AiService, AiServiceConfig};

pub struct TestApp {
    pub service: Arc<AiService>,
}

impl TestApp {
    /// App with no AI credential: every generation request is served by
    /// the offline synthesizer, so tests need no network.
    pub fn new() -> Self {
        let config = AiServiceConfig {
            api_key: None,
            ..AiServiceConfig::default()
        };
        Self {
            service: Arc::new(AiService::new(config)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.service.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
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
    }
}
