//! Edge gatekeeper: coarse role-based page routing that runs before any
//! handler logic.
//!
//! Decisions here are made from the token alone. No store round trip happens
//! on this path, so a stale role claim is honored until the token expires;
//! fine-grained authorization on API routes re-resolves the user instead.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::{
    state::AppState,
    utils::{
        cookies::{extract_cookie_value, TOKEN_COOKIE_NAME},
        jwt::verify_token,
        net::client_ip,
    },
};

/// Paths the gatekeeper never touches. API routes and static/metadata assets
/// are excluded by contract, not as an optimization.
const EXCLUDED_PREFIXES: [&str; 2] = ["/api", "/static"];
const EXCLUDED_PATHS: [&str; 3] = ["/favicon.ico", "/robots.txt", "/sitemap.xml"];

pub fn is_excluded_path(path: &str) -> bool {
    EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
        || EXCLUDED_PATHS.contains(&path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request through unmodified.
    Allow,
    /// Admin browsing a public page: send them to the admin home.
    ToAdminHome,
    /// Non-admin (or anonymous) inside the admin area: send them home.
    ToSiteHome,
}

/// First-match transition rules over the (role, path) classification.
pub fn route_decision(is_admin: bool, path: &str) -> RouteDecision {
    let is_public_path =
        path == "/" || path.starts_with("/internships") || path.starts_with("/companies");
    let is_admin_path = path.starts_with("/admin");

    if is_admin && is_public_path && !is_admin_path {
        return RouteDecision::ToAdminHome;
    }
    if is_admin_path && !is_admin {
        return RouteDecision::ToSiteHome;
    }
    RouteDecision::Allow
}

pub async fn gatekeeper(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if is_excluded_path(&path) {
        return next.run(request).await;
    }

    let headers = request.headers();
    let ip = client_ip(headers);
    let at = Utc::now()
        .with_timezone(&state.config.time_zone)
        .format("%d/%m/%Y, %I:%M:%S %p")
        .to_string();
    tracing::info!(
        method = %request.method(),
        target = %request.uri(),
        ip = %ip,
        %at,
        "edge request"
    );

    let is_admin = headers
        .get(axum::http::header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, TOKEN_COOKIE_NAME))
        .and_then(|token| verify_token(&token, &state.config.session_secret))
        .map(|claims| claims.is_admin())
        .unwrap_or(false);

    match route_decision(is_admin, &path) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::ToAdminHome => Redirect::temporary("/admin").into_response(),
        RouteDecision::ToSiteHome => Redirect::temporary("/").into_response(),
    }
}
