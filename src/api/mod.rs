pub mod alerts;
pub mod auth;
pub mod emails;
pub mod health;
pub mod metrics;
pub mod pages;
pub mod state;
pub mod stats;
pub mod swagger;

pub use state::AppState;

use crate::middleware::AuthMiddleware;
use actix_web::web;
use std::sync::Arc;

/// Registers every route. Shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    let jwt = Arc::new(state.config.jwt.clone());

    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Auth endpoints
        .service(
            web::scope("/api/auth")
                .route("/demo", web::post().to(auth::demo_login))
                .route("/logout", web::post().to(auth::logout))
                .service(
                    web::resource("/verify")
                        .wrap(AuthMiddleware::new(Arc::clone(&jwt)))
                        .route(web::get().to(auth::verify_token)),
                )
                .service(
                    web::resource("/me")
                        .wrap(AuthMiddleware::new(Arc::clone(&jwt)))
                        .route(web::get().to(auth::get_me)),
                ),
        )
        // Page view models (session optional)
        .route("/api/view", web::get().to(pages::get_view))
        .service(
            web::scope("/api/stats")
                .wrap(AuthMiddleware::new(Arc::clone(&jwt)))
                .route("", web::get().to(stats::get_stats)),
        )
        .service(
            web::scope("/api/emails")
                .wrap(AuthMiddleware::new(Arc::clone(&jwt)))
                .route("", web::get().to(emails::get_emails))
                .route("/analyze", web::post().to(emails::analyze_email))
                .route("/start-monitoring", web::post().to(emails::start_monitoring))
                .route("/stop-monitoring", web::post().to(emails::stop_monitoring))
                .route("/monitoring", web::get().to(emails::monitoring_status)),
        )
        .service(
            web::scope("/api/alerts")
                .wrap(AuthMiddleware::new(jwt))
                .route("", web::get().to(alerts::get_alerts))
                .route("/{id}/read", web::post().to(alerts::mark_alert_read))
                .route("/{id}", web::delete().to(alerts::dismiss_alert)),
        );
}
