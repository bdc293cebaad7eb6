//! Identity resolution for API routes.
//!
//! Every failure path here degrades to "anonymous" rather than erroring:
//! missing cookie, invalid or expired token, a user deleted after the token
//! was issued, or an unreachable store. Whether anonymity is acceptable is
//! the route's decision, which is what the `auth` / `auth_admin` layers
//! encode.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    db::connection::DbPool,
    error::AppError,
    models::user::User,
    repositories::user as user_repo,
    state::AppState,
    utils::{
        cookies::{extract_cookie_value, TOKEN_COOKIE_NAME},
        jwt::{verify_token, Claims},
    },
};

/// Resolves the session cookie to a user record, or `None` for anonymous.
/// One store read per call; callers pass the resolved user along instead of
/// re-resolving within a request.
pub async fn resolve_user(headers: &HeaderMap, pool: &DbPool, secret: &str) -> Option<User> {
    authenticate_request(headers, pool, secret)
        .await
        .map(|(_, user)| user)
}

async fn authenticate_request(
    headers: &HeaderMap,
    pool: &DbPool,
    secret: &str,
) -> Option<(Claims, User)> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    let token = extract_cookie_value(cookie_header, TOKEN_COOKIE_NAME)?;
    let claims = verify_token(&token, secret)?;

    match user_repo::find_by_id(pool, &claims.sub).await {
        Ok(Some(user)) => Some((claims, user)),
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, "User lookup failed during authentication");
            None
        }
    }
}

/// Requires an authenticated user; inserts `Claims` and `User` extensions.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (claims, user) = authenticate_request(
        request.headers(),
        &state.pool,
        &state.config.session_secret,
    )
    .await
    .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Requires an authenticated user with the `admin` role.
pub async fn auth_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (claims, user) = authenticate_request(
        request.headers(),
        &state.pool,
        &state.config.session_secret,
    )
    .await
    .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    if !user.is_admin() {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
