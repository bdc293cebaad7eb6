//! Login, signup, logout, and session introspection.

use axum::{
    extract::{Extension, State},
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;

use crate::{
    config::Config,
    error::AppError,
    models::user::{GoogleLoginRequest, SignupRequest, User, UserResponse},
    repositories::user as user_repo,
    services::google,
    state::AppState,
    utils::{
        cookies::{build_clear_cookie, build_session_cookie, CookieOptions},
        jwt::issue_token,
    },
};

/// `POST /api/auth/google` — exchanges a Google credential for a session.
pub async fn google_login(
    State(state): State<AppState>,
    Json(payload): Json<GoogleLoginRequest>,
) -> Result<Response, AppError> {
    let credential = payload
        .credential
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing credential".to_string()))?;

    let info = google::verify_credential(&state.http_client, &credential).await?;
    google::check_audience(&info, state.config.google_client_id.as_deref())?;

    let email = info
        .email
        .ok_or_else(|| AppError::BadRequest("Google token missing email".to_string()))?;
    let name = info.name.unwrap_or_default();

    let user = user_repo::find_or_create(&state.pool, &email, &name, info.sub.as_deref())
        .await
        .map_err(AppError::from)?;

    session_response(&state.config, &user)
}

/// `POST /api/auth/signup` — direct signup with an email and name.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Response, AppError> {
    let (email, name) = match (
        payload.email.filter(|v| !v.is_empty()),
        payload.name.filter(|v| !v.is_empty()),
    ) {
        (Some(email), Some(name)) => (email, name),
        _ => return Err(AppError::BadRequest("Missing fields".to_string())),
    };

    let user = user_repo::find_or_create(&state.pool, &email, &name, payload.google_id.as_deref())
        .await
        .map_err(AppError::from)?;

    session_response(&state.config, &user)
}

/// `POST /api/auth/logout` — instructs the client to discard the session.
pub async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    let cookie = build_clear_cookie(CookieOptions {
        secure: state.config.cookie_secure,
    });
    let mut response = Json(json!({ "success": true })).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, header_value(&cookie)?);
    Ok(response)
}

/// `GET /api/auth/me` — the resolved caller; the auth layer guarantees one.
pub async fn me(Extension(user): Extension<User>) -> Json<serde_json::Value> {
    Json(json!({
        "authenticated": true,
        "user": UserResponse::from(user),
    }))
}

/// Issues a token for the user and attaches it both as the response body and
/// as the HTTP-only session cookie.
fn session_response(config: &Config, user: &User) -> Result<Response, AppError> {
    let token = issue_token(
        user.id.clone(),
        user.role.as_str().to_string(),
        user.email.clone(),
        &config.session_secret,
        config.session_ttl_days,
    )
    .map_err(AppError::InternalServerError)?;

    let cookie = build_session_cookie(
        &token,
        Duration::from_secs(config.session_max_age_secs()),
        CookieOptions {
            secure: config.cookie_secure,
        },
    );

    let mut response = Json(json!({ "success": true, "token": token })).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, header_value(&cookie)?);
    Ok(response)
}

fn header_value(cookie: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(cookie).map_err(|err| AppError::InternalServerError(err.into()))
}
