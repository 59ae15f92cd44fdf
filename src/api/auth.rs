use crate::{
    api::state::AppState,
    models::UserInfo,
    pages::{self, View},
    services::auth_service::{self, Claims, DemoLoginResponse, VerifyTokenResponse},
};
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    post,
    path = "/api/auth/demo",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed in as the demo user", body = DemoLoginResponse),
        (status = 500, description = "Token could not be issued")
    )
)]
pub async fn demo_login(state: web::Data<AppState>) -> HttpResponse {
    log::info!("🔐 POST /auth/demo");

    match auth_service::demo_login(state.store.as_ref(), &state.config.jwt).await {
        Ok(response) => {
            log::info!("✅ Demo login successful: {}", response.user.email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Demo login failed: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid", body = VerifyTokenResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn verify_token(claims: web::ReqData<Claims>) -> HttpResponse {
    log::debug!("🔍 GET /auth/verify - {}", claims.sub);

    HttpResponse::Ok().json(VerifyTokenResponse {
        valid: true,
        email: claims.sub.clone(),
        exp: claims.exp,
    })
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "User information retrieved", body = UserInfo),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("👤 GET /auth/me - {}", claims.sub);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "user": claims.user()
    }))
}

/// Tokens are stateless; logging out only tells the client where to go next.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Client should discard its token and show the login view")
    )
)]
pub async fn logout() -> HttpResponse {
    log::info!("👋 POST /auth/logout");

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "view": View::Login,
        "page": pages::login_page()
    }))
}
