use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talent_bridge_backend::{
    config::Config,
    db::connection::{create_pool, DbPool},
    db::redis::create_redis_pool,
    router::build_router,
    services::rate_limit::RateLimiter,
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talent_bridge_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        session_secret = %mask_secret(&config.session_secret),
        session_ttl_days = config.session_ttl_days,
        redis = config.redis_url.is_some(),
        google_client_id = config.google_client_id.is_some(),
        time_zone = %config.time_zone,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool: DbPool = create_pool(&config.database_url)?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Admission control is optional: no Redis means every check passes.
    let rate_limiter = create_redis_pool(&config).await?.map(RateLimiter::new);

    let http_client = reqwest::Client::new();
    let state = AppState::new(pool, config, rate_limiter, http_client);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
