use crate::{
    api::state::AppState,
    jobs::{MonitorStatus, StartOutcome},
    models::EmailSummary,
    services::{
        auth_service::Claims,
        email_service::{self, AnalyzeRequest, AnalyzeResponse},
    },
};
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct EmailsQuery {
    /// Number of emails to return (default 20, max 100)
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/emails",
    tag = "Emails",
    params(EmailsQuery),
    responses(
        (status = 200, description = "Most recent emails, newest first", body = Vec<EmailSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Database error")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_emails(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
    query: web::Query<EmailsQuery>,
) -> HttpResponse {
    log::debug!("📧 GET /emails - {} (limit: {:?})", claims.sub, query.limit);

    match email_service::recent_emails(state.store.as_ref(), &claims.sub, query.limit).await {
        Ok(emails) => HttpResponse::Ok().json(emails),
        Err(e) => {
            log::error!("❌ Failed to load emails for {}: {}", claims.sub, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/emails/analyze",
    tag = "Emails",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Verdict and extracted features; nothing is stored", body = AnalyzeResponse),
        (status = 400, description = "Empty message"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn analyze_email(
    state: web::Data<AppState>,
    request: web::Json<AnalyzeRequest>,
) -> HttpResponse {
    match email_service::analyze(state.classifier.as_ref(), &request) {
        Ok(response) => {
            log::info!(
                "🔎 Analyzed '{}': phishing={} ({:.2})",
                response.subject,
                response.verdict.is_phishing,
                response.verdict.probability
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("⚠️  Analyze rejected: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/emails/start-monitoring",
    tag = "Emails",
    responses(
        (status = 200, description = "Monitoring started, or already running"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn start_monitoring(state: web::Data<AppState>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("▶️  POST /emails/start-monitoring - {}", claims.sub);

    let outcome = state.monitor.start(&claims.sub).await;

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Email monitoring started in demo mode",
        "mode": "demo",
        "already_running": outcome == StartOutcome::AlreadyRunning
    }))
}

#[utoipa::path(
    post,
    path = "/api/emails/stop-monitoring",
    tag = "Emails",
    responses(
        (status = 200, description = "Monitoring stopped"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn stop_monitoring(state: web::Data<AppState>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("⏹️  POST /emails/stop-monitoring - {}", claims.sub);

    let was_running = state.monitor.stop().await;

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Email monitoring stopped",
        "was_running": was_running
    }))
}

#[utoipa::path(
    get,
    path = "/api/emails/monitoring",
    tag = "Emails",
    responses(
        (status = 200, description = "Monitor status", body = MonitorStatus),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn monitoring_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.monitor.status().await)
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{bearer, test_app_state};
    use crate::services::store::memory::InMemoryStore;
    use actix_web::{http::StatusCode, test, web, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn analyze_scores_without_storing() {
        let store = Arc::new(InMemoryStore::default());
        let state = test_app_state(store.clone());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| crate::api::configure(cfg, &state)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/emails/analyze")
            .insert_header(("Authorization", bearer(&state)))
            .set_json(serde_json::json!({
                "subject": "Urgent: Verify Your Bank Account",
                "body": "Click here to verify your bank password: http://bit.ly/abc"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["verdict"]["is_phishing"], true);
        assert_eq!(body["classifier"], "rule-based");
        assert_eq!(body["features"]["shortened_links"], 1);
        assert!(store.emails.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn analyze_rejects_empty_body() {
        let state = test_app_state(Arc::new(InMemoryStore::default()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| crate::api::configure(cfg, &state)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/emails/analyze")
            .insert_header(("Authorization", bearer(&state)))
            .set_json(serde_json::json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn start_twice_reports_already_running() {
        let state = test_app_state(Arc::new(InMemoryStore::default()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| crate::api::configure(cfg, &state)),
        )
        .await;

        let start = || {
            test::TestRequest::post()
                .uri("/api/emails/start-monitoring")
                .insert_header(("Authorization", bearer(&state)))
                .to_request()
        };

        let first: serde_json::Value = test::call_and_read_body_json(&app, start()).await;
        assert_eq!(first["mode"], "demo");
        assert_eq!(first["already_running"], false);

        let second: serde_json::Value = test::call_and_read_body_json(&app, start()).await;
        assert_eq!(second["already_running"], true);

        let req = test::TestRequest::get()
            .uri("/api/emails/monitoring")
            .insert_header(("Authorization", bearer(&state)))
            .to_request();
        let status: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["running"], true);
        assert_eq!(status["user_id"], "demo@phishguard.ai");

        let req = test::TestRequest::post()
            .uri("/api/emails/stop-monitoring")
            .insert_header(("Authorization", bearer(&state)))
            .to_request();
        let stopped: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stopped["was_running"], true);
    }
}
