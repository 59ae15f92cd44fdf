use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use phishguard::{
    api::{self, AppState},
    config::AppConfig,
    database::MongoDB,
    middleware,
    services::MongoStore,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting PhishGuard AI...");
    log::info!("📊 Database: {} ({})", config.mongodb_uri, config.mongodb_database);

    // Initialize MongoDB connection
    let db = MongoDB::new(&config).await.map_err(|e| {
        log::error!("❌ Failed to connect to MongoDB: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    log::info!("✅ MongoDB connected successfully");

    // Collections and indexes
    if let Err(e) = db.bootstrap().await {
        log::warn!("⚠️  Database bootstrap failed, continuing: {}", e);
    }

    let state = AppState::new(config.clone(), Arc::new(MongoStore::new(db)));
    let state_data = web::Data::new(state.clone());
    let monitor = state.monitor.clone();

    let bind_addr = config.bind_addr();
    log::info!("🌐 Server starting on {}", bind_addr);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_addr);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_addr);

    let cors_origin = config.cors_origin.clone();

    // Start HTTP server
    let result = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin) // Dashboard front-end
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(|cfg| api::configure(cfg, &state))
    })
    .bind(&bind_addr)?
    .run()
    .await;

    // The monitor task would otherwise outlive the server
    monitor.stop().await;
    log::info!("👋 PhishGuard AI stopped");

    result
}
