//! Per-page view models.

use super::fallback::{self, Highlight, InfoCard, ProjectInfo, TeamMember, WorkflowStep};
use super::{fetch_or_fallback, Page, Sourced};
use crate::{
    jobs::{EmailMonitor, MonitorStatus},
    models::{AlertSummary, DashboardStats, EmailSummary, StatisticsReport, UserInfo},
    services::{alert_service, email_service, stats_service, PhishStore},
};
use serde::Serialize;

/// What a page needs to load its data
pub struct PageContext<'a> {
    pub store: &'a dyn PhishStore,
    pub monitor: &'a EmailMonitor,
    pub user: &'a UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusItem {
    pub label: &'static str,
    pub status: String,
    pub healthy: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub title: &'static str,
    pub alert_banner: Option<String>,
    pub stats: Sourced<DashboardStats>,
    pub recent_emails: Sourced<Vec<EmailSummary>>,
    pub alerts: Sourced<Vec<AlertSummary>>,
    pub monitoring: MonitorStatus,
    pub system_status: Vec<StatusItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertsPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub alerts: Sourced<Vec<AlertSummary>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub report: StatisticsReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub members: Vec<TeamMember>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub mission: &'static str,
    pub technology: Vec<InfoCard>,
    pub workflow: Vec<WorkflowStep>,
    pub project: ProjectInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginPage {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub features: Vec<&'static str>,
    pub login_endpoint: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PageContent {
    Dashboard(DashboardPage),
    Alerts(AlertsPage),
    Statistics(StatisticsPage),
    Team(TeamPage),
    About(AboutPage),
    Login(LoginPage),
}

/// "1 new security alert detected", "3 new security alerts detected"
pub fn alert_banner(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 new security alert detected".to_string()),
        n => Some(format!("{} new security alerts detected", n)),
    }
}

pub async fn dashboard_page(ctx: &PageContext<'_>) -> DashboardPage {
    let user_id = ctx.user.email.as_str();

    let (stats, recent_emails, alerts) = futures::join!(
        fetch_or_fallback(
            "stats",
            stats_service::dashboard_stats(ctx.store, user_id),
            fallback::dashboard_stats,
        ),
        fetch_or_fallback(
            "emails",
            email_service::recent_emails(ctx.store, user_id, None),
            fallback::dashboard_emails,
        ),
        fetch_or_fallback(
            "alerts",
            alert_service::list_alerts(ctx.store, user_id, false),
            fallback::dashboard_alerts,
        ),
    );

    let monitoring = ctx.monitor.status().await;

    let system_status = vec![
        StatusItem {
            label: "AI Model",
            status: "Running".to_string(),
            healthy: true,
        },
        StatusItem {
            label: "Database",
            status: if stats.is_live() { "Connected" } else { "Demo data" }.to_string(),
            healthy: stats.is_live(),
        },
        StatusItem {
            label: "Email Scanner",
            status: if monitoring.running { "Active" } else { "Inactive" }.to_string(),
            healthy: monitoring.running,
        },
    ];

    DashboardPage {
        title: "Security Dashboard",
        alert_banner: alert_banner(alerts.data.len()),
        stats,
        recent_emails,
        alerts,
        monitoring,
        system_status,
    }
}

pub async fn alerts_page(ctx: &PageContext<'_>) -> AlertsPage {
    let alerts = fetch_or_fallback(
        "alerts",
        alert_service::list_alerts(ctx.store, &ctx.user.email, false),
        fallback::alerts_page_alerts,
    )
    .await;

    AlertsPage {
        title: "Security Alerts",
        subtitle: "Recent phishing detection alerts and notifications",
        alerts,
    }
}

pub fn statistics_page() -> StatisticsPage {
    StatisticsPage {
        title: "Analytics & Statistics",
        subtitle: "Comprehensive overview of email security performance",
        report: fallback::statistics_report(),
    }
}

pub fn team_page() -> TeamPage {
    TeamPage {
        title: "Our Team",
        subtitle: "Meet the talented individuals behind PhishGuard AI",
        members: fallback::team_members(),
        highlights: fallback::team_highlights(),
    }
}

pub fn about_page() -> AboutPage {
    AboutPage {
        title: "About PhishGuard AI",
        subtitle: "Advanced AI-powered phishing detection for modern organizations",
        mission: fallback::MISSION,
        technology: fallback::technology_cards(),
        workflow: fallback::workflow_steps(),
        project: fallback::project_info(),
    }
}

pub fn login_page() -> LoginPage {
    LoginPage {
        brand: "PhishGuard AI",
        tagline: "AI-Powered Phishing Email Detection System",
        heading: "Welcome to PhishGuard AI",
        subtitle: "Demo Version - FYP Project",
        features: fallback::DEMO_FEATURES.to_vec(),
        login_endpoint: "/api/auth/demo",
    }
}

pub async fn render_page(page: Page, ctx: &PageContext<'_>) -> PageContent {
    match page {
        Page::Dashboard => PageContent::Dashboard(dashboard_page(ctx).await),
        Page::Alerts => PageContent::Alerts(alerts_page(ctx).await),
        Page::Statistics => PageContent::Statistics(statistics_page()),
        Page::Team => PageContent::Team(team_page()),
        Page::About => PageContent::About(about_page()),
    }
}
