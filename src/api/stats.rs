use crate::{
    api::state::AppState,
    models::DashboardStats,
    services::{auth_service::Claims, stats_service},
};
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Email counters for the caller", body = DashboardStats),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Database error")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(state: web::Data<AppState>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::debug!("📊 GET /stats - {}", claims.sub);

    match stats_service::dashboard_stats(state.store.as_ref(), &claims.sub).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            log::error!("❌ Failed to load stats for {}: {}", claims.sub, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{bearer, test_app_state};
    use crate::models::EmailRecord;
    use crate::services::store::memory::{InMemoryStore, UnavailableStore};
    use crate::services::PhishStore;
    use actix_web::{http::StatusCode, test, web, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn reports_counts_and_rate() {
        let store = Arc::new(InMemoryStore::default());
        for (subject, phishing) in [("a", true), ("b", false), ("c", false), ("d", false)] {
            store
                .insert_email(&EmailRecord::new("demo@phishguard.ai", subject, "x", phishing, 0.5, true))
                .await
                .unwrap();
        }

        let state = test_app_state(store);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| crate::api::configure(cfg, &state)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/stats")
            .insert_header(("Authorization", bearer(&state)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_emails"], 4);
        assert_eq!(body["phishing_emails"], 1);
        assert_eq!(body["today_emails"], 4);
        assert_eq!(body["detection_rate"], 25.0);
    }

    #[actix_web::test]
    async fn database_outage_is_a_500_with_json_error() {
        let state = test_app_state(Arc::new(UnavailableStore));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| crate::api::configure(cfg, &state)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/stats")
            .insert_header(("Authorization", bearer(&state)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
    }
}
