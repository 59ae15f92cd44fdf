use crate::api::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub uptime_secs: u64,
    /// `connected` or `unreachable`
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up; `status` is `degraded` when MongoDB is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            log::warn!("⚠️  Health check: database unreachable: {}", e);
            "unreachable"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: if database == "connected" { "healthy" } else { "degraded" }.to_string(),
        service: "phishguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        database: database.to_string(),
    })
}
