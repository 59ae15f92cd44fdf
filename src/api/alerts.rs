use crate::{
    api::state::AppState,
    models::AlertSummary,
    services::{alert_service, auth_service::Claims},
};
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AlertsQuery {
    /// Only alerts not yet marked read
    #[serde(default)]
    pub unread_only: bool,
}

#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alerts",
    params(AlertsQuery),
    responses(
        (status = 200, description = "Alerts for the caller, newest first", body = Vec<AlertSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Database error")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_alerts(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
    query: web::Query<AlertsQuery>,
) -> HttpResponse {
    log::debug!("🚨 GET /alerts - {} (unread_only: {})", claims.sub, query.unread_only);

    match alert_service::list_alerts(state.store.as_ref(), &claims.sub, query.unread_only).await {
        Ok(alerts) => HttpResponse::Ok().json(alerts),
        Err(e) => {
            log::error!("❌ Failed to load alerts for {}: {}", claims.sub, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/alerts/{id}/read",
    tag = "Alerts",
    params(
        ("id" = String, Path, description = "Alert id")
    ),
    responses(
        (status = 200, description = "Alert marked read"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such alert for this user")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn mark_alert_read(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
) -> HttpResponse {
    let alert_id = path.into_inner();

    match alert_service::mark_read(state.store.as_ref(), &claims.sub, &alert_id).await {
        Ok(()) => {
            log::info!("✅ Alert {} marked read", alert_id);
            HttpResponse::Ok().json(serde_json::json!({ "success": true }))
        }
        Err(e) => {
            log::warn!("⚠️  Could not mark alert {} read: {}", alert_id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/alerts/{id}",
    tag = "Alerts",
    params(
        ("id" = String, Path, description = "Alert id")
    ),
    responses(
        (status = 200, description = "Alert dismissed"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such alert for this user")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn dismiss_alert(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
) -> HttpResponse {
    let alert_id = path.into_inner();

    match alert_service::dismiss(state.store.as_ref(), &claims.sub, &alert_id).await {
        Ok(()) => {
            log::info!("🗑️  Alert {} dismissed", alert_id);
            HttpResponse::Ok().json(serde_json::json!({ "success": true }))
        }
        Err(e) => {
            log::warn!("⚠️  Could not dismiss alert {}: {}", alert_id, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{bearer, test_app_state};
    use crate::models::AlertRecord;
    use crate::services::store::memory::InMemoryStore;
    use crate::services::PhishStore;
    use actix_web::{http::StatusCode, test, web, App};
    use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
    use std::sync::Arc;

    fn alert(user_id: &str, subject: &str, is_read: bool) -> AlertRecord {
        AlertRecord {
            id: None,
            user_id: user_id.to_string(),
            email_id: "e".to_string(),
            subject: subject.to_string(),
            probability: 0.9,
            triggered_at: BsonDateTime::now(),
            is_read,
            is_demo: true,
        }
    }

    #[actix_web::test]
    async fn alert_lifecycle() {
        let store = Arc::new(InMemoryStore::default());
        let mine = store.insert_alert(&alert("demo@phishguard.ai", "mine", false)).await.unwrap();
        store.insert_alert(&alert("demo@phishguard.ai", "seen", true)).await.unwrap();
        let foreign = store.insert_alert(&alert("other@example.com", "theirs", false)).await.unwrap();

        let state = test_app_state(store.clone());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| crate::api::configure(cfg, &state)),
        )
        .await;
        let auth = bearer(&state);

        let req = test::TestRequest::get()
            .uri("/api/alerts?unread_only=true")
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let unread: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unread.as_array().unwrap().len(), 1);
        assert_eq!(unread[0]["subject"], "mine");

        let req = test::TestRequest::post()
            .uri(&format!("/api/alerts/{}/read", mine))
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri(&format!("/api/alerts/{}/read", foreign))
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri("/api/alerts/not-an-id")
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/alerts/{}", ObjectId::new().to_hex()))
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/alerts/{}", mine))
            .insert_header(("Authorization", auth))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let remaining: Vec<String> = store.alerts.lock().unwrap().iter().map(|a| a.subject.clone()).collect();
        assert_eq!(remaining, vec!["seen", "theirs"]);
    }
}
