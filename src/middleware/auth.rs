use crate::{config::JwtConfig, services::auth_service, utils::AppError};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::sync::Arc;

/// Requires a valid bearer token and stores its `Claims` in the request
/// extensions, where handlers read them with `web::ReqData<Claims>`.
/// Rejected requests get the JSON 401 body of `AppError::Unauthorized`.
pub struct AuthMiddleware {
    jwt: Arc<JwtConfig>,
}

impl AuthMiddleware {
    pub fn new(jwt: Arc<JwtConfig>) -> Self {
        Self { jwt }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt: Arc::clone(&self.jwt),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt: Arc<JwtConfig>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight carries no credentials
        if *req.method() == actix_web::http::Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let claims = match header.as_deref() {
            None => Err(AppError::Unauthorized("Missing authorization token".to_string())),
            Some(value) => match auth_service::bearer_token(value) {
                None => Err(AppError::Unauthorized("Invalid token format".to_string())),
                Some(token) => auth_service::verify_token(token, &self.jwt),
            },
        };

        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                let res = req.into_response(e.error_response()).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    fn jwt() -> Arc<JwtConfig> {
        Arc::new(JwtConfig {
            secret: "middleware-test-secret".to_string(),
            issuer: "phishguard".to_string(),
            audience: "phishguard-dashboard".to_string(),
            expires_hours: 1,
        })
    }

    #[actix_web::test]
    async fn rejection_is_a_json_response_not_an_error() {
        let app = test::init_service(
            App::new().service(
                web::scope("/guarded")
                    .wrap(AuthMiddleware::new(jwt()))
                    .route("", web::get().to(|| async { HttpResponse::Ok().body("inside") })),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, "Basic abc"))
            .to_request();
        let res = test::try_call_service(&app, req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);

        let req = test::TestRequest::with_uri("/guarded")
            .method(actix_web::http::Method::OPTIONS)
            .to_request();
        let res = test::try_call_service(&app, req).await.unwrap();
        assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
