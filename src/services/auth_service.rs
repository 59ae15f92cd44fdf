use crate::{
    config::JwtConfig,
    models::{User, UserInfo},
    services::store::PhishStore,
    utils::AppError,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "demo@phishguard.ai";
pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_PICTURE: &str = "https://via.placeholder.com/150/1a73e8/ffffff?text=DU";

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,           // email
    pub name: String,
    pub picture: Option<String>,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
    pub aud: String,           // audience
    pub iss: String,           // issuer
}

impl Claims {
    /// The user the token was issued to
    pub fn user(&self) -> UserInfo {
        UserInfo {
            email: self.sub.clone(),
            name: self.name.clone(),
            picture: self.picture.clone(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DemoLoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub email: String,
    pub exp: usize,
}

pub fn demo_user() -> UserInfo {
    UserInfo {
        email: DEMO_EMAIL.to_string(),
        name: DEMO_NAME.to_string(),
        picture: Some(DEMO_PICTURE.to_string()),
    }
}

// Generate JWT token
pub fn generate_jwt(user: &UserInfo, jwt: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now();

    let claims = Claims {
        sub: user.email.clone(),
        name: user.name.clone(),
        picture: user.picture.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(jwt.expires_hours)).timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
        aud: jwt.audience.clone(),
        iss: jwt.issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt.secret.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str, jwt: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[jwt.audience.as_str()]);

    let mut issuers = HashSet::new();
    issuers.insert(jwt.issuer.clone());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

/// Token part of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Signs in as the demo user.
///
/// The user document is refreshed on a best-effort basis; an unreachable
/// database does not block the demo login.
pub async fn demo_login(
    store: &dyn PhishStore,
    jwt: &JwtConfig,
) -> Result<DemoLoginResponse, AppError> {
    let user = demo_user();

    let document = User {
        id: None,
        email: user.email.clone(),
        name: user.name.clone(),
        picture: user.picture.clone(),
        created_at: None,
        last_login: None,
    };

    if let Err(e) = store.upsert_user(&document).await {
        log::warn!("⚠️  Could not record demo login for {}: {}", user.email, e);
    }

    let access_token = generate_jwt(&user, jwt)?;

    Ok(DemoLoginResponse { access_token, user })
}
