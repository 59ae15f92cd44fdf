use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PhishGuard AI API",
        version = "1.0.0",
        description = "API for the PhishGuard AI demo dashboard. \n\n**Authentication:** sign in with `POST /api/auth/demo` and send the returned token as a JWT Bearer token.\n\n**Features:**\n- Demo login\n- Rule-based phishing detection\n- Simulated inbox monitoring and alerts\n- Page view models with demo-data fallback\n- Health monitoring and metrics",
        contact(
            name = "PhishGuard AI Team",
            email = "support@phishguard.ai"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::demo_login,
        crate::api::auth::verify_token,
        crate::api::auth::get_me,
        crate::api::auth::logout,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Dashboard data
        crate::api::stats::get_stats,
        crate::api::emails::get_emails,
        crate::api::emails::analyze_email,
        crate::api::emails::start_monitoring,
        crate::api::emails::stop_monitoring,
        crate::api::emails::monitoring_status,
        crate::api::alerts::get_alerts,
        crate::api::alerts::mark_alert_read,
        crate::api::alerts::dismiss_alert,

        // Pages
        crate::api::pages::get_view,
    ),
    components(
        schemas(
            // Auth
            crate::models::UserInfo,
            crate::services::auth_service::DemoLoginResponse,
            crate::services::auth_service::VerifyTokenResponse,

            // Health & Metrics
            crate::api::health::HealthResponse,

            // Dashboard data
            crate::models::DashboardStats,
            crate::models::EmailSummary,
            crate::models::AlertSummary,
            crate::services::email_service::AnalyzeRequest,
            crate::services::email_service::AnalyzeResponse,
            crate::detection::Verdict,
            crate::detection::EmailFeatures,
            crate::jobs::MonitorStatus,

            // Pages
            crate::pages::View,
            crate::pages::Page,
            crate::pages::DataSource,
        )
    ),
    tags(
        (name = "Auth", description = "Demo sign-in and token inspection."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
        (name = "Dashboard", description = "Counters behind the dashboard cards."),
        (name = "Emails", description = "Analyzed emails, ad-hoc analysis and the demo inbox monitor."),
        (name = "Alerts", description = "Phishing alerts raised for the signed-in user."),
        (name = "Pages", description = "Route resolution and page view models for the front-end."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/auth/demo"))
                        .build()
                ),
            );
        }
    }
}
