use crate::api::state::AppState;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub monitor_running: bool,
    pub monitor_emails_processed_total: u64,
    pub monitor_alerts_raised_total: u64,
}

fn render(metrics: &MetricsResponse) -> String {
    format!(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\
         \n\
         # HELP http_errors_total Total number of HTTP errors\n\
         # TYPE http_errors_total counter\n\
         http_errors_total {}\n\
         \n\
         # HELP phishguard_monitor_running Whether the demo email monitor is running\n\
         # TYPE phishguard_monitor_running gauge\n\
         phishguard_monitor_running {}\n\
         \n\
         # HELP phishguard_monitor_emails_processed_total Emails classified by the current monitor run\n\
         # TYPE phishguard_monitor_emails_processed_total counter\n\
         phishguard_monitor_emails_processed_total {}\n\
         \n\
         # HELP phishguard_monitor_alerts_raised_total Alerts raised by the current monitor run\n\
         # TYPE phishguard_monitor_alerts_raised_total counter\n\
         phishguard_monitor_alerts_raised_total {}\n",
        metrics.http_requests_total,
        metrics.http_errors_total,
        u8::from(metrics.monitor_running),
        metrics.monitor_emails_processed_total,
        metrics.monitor_alerts_raised_total,
    )
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics(state: web::Data<AppState>) -> HttpResponse {
    let monitor = state.monitor.status().await;

    let metrics = MetricsResponse {
        http_requests_total: REQUEST_COUNT.load(Ordering::Relaxed),
        http_errors_total: ERROR_COUNT.load(Ordering::Relaxed),
        monitor_running: monitor.running,
        monitor_emails_processed_total: monitor.emails_processed,
        monitor_alerts_raised_total: monitor.alerts_raised,
    };

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render(&metrics))
}
