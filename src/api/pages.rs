use crate::{
    api::state::AppState,
    pages::{self, Navigation, PageContent, PageContext, Session, View},
};
use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ViewQuery {
    /// Front-end path to resolve, e.g. `/dashboard`
    pub path: Option<String>,
}

/// A resolved path: the view, the navigation shell around it and its content
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub view: View,
    pub navigation: Option<Navigation>,
    pub page: Option<PageContent>,
}

/// Resolves a front-end path for the (optional) session and loads the page.
///
/// Never fails: data sources that cannot be reached are replaced by demo data.
#[utoipa::path(
    get,
    path = "/api/view",
    tag = "Pages",
    params(ViewQuery),
    responses(
        (status = 200, description = "Resolved view with navigation and page content")
    )
)]
pub async fn get_view(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ViewQuery>,
) -> HttpResponse {
    let path = query.path.as_deref().unwrap_or("/");
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let session = Session::from_authorization(header, &state.config.jwt);

    let view = pages::resolve_route(path, session.as_ref());
    log::debug!("🧭 GET /view {} -> {:?}", path, view);

    let (navigation, page) = match (&view, &session) {
        (View::Page { page }, Some(session)) => {
            let ctx = PageContext {
                store: state.store.as_ref(),
                monitor: &state.monitor,
                user: &session.user,
            };
            (
                Some(pages::navigation(&session.user, path)),
                Some(pages::render_page(*page, &ctx).await),
            )
        }
        (View::NotFound { .. }, Some(session)) => (Some(pages::navigation(&session.user, path)), None),
        (View::Login, _) => (None, Some(PageContent::Login(pages::login_page()))),
        _ => (None, None),
    };

    HttpResponse::Ok().json(ViewResponse { view, navigation, page })
}
