//! Admission control layer for the authentication routes.
//!
//! Two windows guard `/api/auth/*`: a per-IP window and a global window
//! shared by all clients. Without a configured Redis pool the layer is a
//! pass-through, which is the same fail-open posture the limiter itself
//! takes on store errors.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::AppError, services::rate_limit::RateLimit, state::AppState, utils::net::client_ip};

pub async fn auth_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        let config = &state.config;
        let ip = client_ip(request.headers());

        let allowed = limiter
            .allow(
                &format!("auth:{}", ip),
                config.rate_limit_auth_max_requests,
                config.rate_limit_auth_window_seconds,
            )
            .await
            && limiter
                .allow_global(
                    "auth",
                    config.rate_limit_global_max_requests,
                    config.rate_limit_global_window_seconds,
                )
                .await;

        if !allowed {
            tracing::warn!(%ip, "Auth request rejected by rate limiter");
            return AppError::TooManyRequests(
                "Too many requests. Please try again later.".to_string(),
            )
            .into_response();
        }
    }

    next.run(request).await
}
