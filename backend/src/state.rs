use crate::{config::Config, db::connection::DbPool, services::rate_limit::RateLimiter};

/// Process-wide shared state: built once in `main`, cloned per request.
/// Both pools are managed by their own crates; nothing here needs teardown
/// beyond process exit.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    /// `None` when no Redis URL is configured; admission control then
    /// fails open by construction.
    pub rate_limiter: Option<RateLimiter>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        config: Config,
        rate_limiter: Option<RateLimiter>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            pool,
            config,
            rate_limiter,
            http_client,
        }
    }
}
