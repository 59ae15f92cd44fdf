//! Session handling, route resolution and the navigation shell around every
//! authenticated page.

use crate::{
    config::JwtConfig,
    models::UserInfo,
    services::auth_service::{self, Claims},
};
use serde::Serialize;

pub const DEFAULT_AVATAR: &str = "/images/default-avatar.png";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
/// Badge shown on the Alerts link
const ALERTS_BADGE: u32 = 3;

/// A signed-in visitor: the bearer token and the user it was issued to
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

impl Session {
    pub fn from_claims(token: &str, claims: &Claims) -> Self {
        Self {
            token: token.to_string(),
            user: claims.user(),
        }
    }

    /// Builds a session from an `Authorization` header value. Missing, malformed
    /// or expired tokens all mean "signed out".
    pub fn from_authorization(header_value: Option<&str>, jwt: &JwtConfig) -> Option<Self> {
        let token = auth_service::bearer_token(header_value?)?;
        match auth_service::verify_token(token, jwt) {
            Ok(claims) => Some(Self::from_claims(token, &claims)),
            Err(e) => {
                log::debug!("🔒 Ignoring session: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    Alerts,
    Statistics,
    Team,
    About,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Dashboard, Page::Alerts, Page::Statistics, Page::Team, Page::About];

    pub fn path(self) -> &'static str {
        match self {
            Page::Dashboard => "/dashboard",
            Page::Alerts => "/alerts",
            Page::Statistics => "/statistics",
            Page::Team => "/team",
            Page::About => "/about",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Alerts => "Alerts",
            Page::Statistics => "Statistics",
            Page::Team => "Our Team",
            Page::About => "About",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Page::Dashboard => "fa-tachometer-alt",
            Page::Alerts => "fa-bell",
            Page::Statistics => "fa-chart-bar",
            Page::Team => "fa-users",
            Page::About => "fa-info-circle",
        }
    }

    fn from_path(path: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.path() == path)
    }
}

/// What the front-end should show for a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Login,
    Redirect { location: String },
    Page { page: Page },
    NotFound { path: String },
}

/// `/dashboard/` and `/dashboard?x=1` both resolve like `/dashboard`
fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Without a session every path shows the login page
pub fn resolve_route(path: &str, session: Option<&Session>) -> View {
    if session.is_none() {
        return View::Login;
    }

    let path = normalize_path(path);
    if path == "/" {
        return View::Redirect {
            location: Page::Dashboard.path().to_string(),
        };
    }

    match Page::from_path(path) {
        Some(page) => View::Page { page },
        None => View::NotFound {
            path: path.to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub badge: Option<u32>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCard {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoutAction {
    pub label: &'static str,
    pub method: &'static str,
    pub endpoint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation {
    pub brand: &'static str,
    pub links: Vec<NavLink>,
    pub user: UserCard,
    pub logout: LogoutAction,
}

pub fn navigation(user: &UserInfo, current_path: &str) -> Navigation {
    let current = normalize_path(current_path);

    let links = Page::ALL
        .into_iter()
        .map(|page| NavLink {
            path: page.path(),
            label: page.label(),
            icon: page.icon(),
            badge: (page == Page::Alerts).then_some(ALERTS_BADGE),
            active: page.path() == current,
        })
        .collect();

    Navigation {
        brand: "PhishGuard AI",
        links,
        user: UserCard {
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user
                .picture
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        },
        logout: LogoutAction {
            label: "Logout",
            method: "POST",
            endpoint: LOGOUT_ENDPOINT,
        },
    }
}
