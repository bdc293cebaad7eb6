use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_days: u64,
    pub google_client_id: Option<String>,
    pub redis_url: Option<String>,
    pub redis_pool_size: u32,
    pub redis_connect_timeout: u64,
    pub rate_limit_auth_max_requests: u32,
    pub rate_limit_auth_window_seconds: u64,
    pub rate_limit_global_max_requests: u32,
    pub rate_limit_global_window_seconds: u64,
    pub cookie_secure: bool,
    pub time_zone: Tz,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow!("DATABASE_URL environment variable is not set"))?;

        // Fail closed: every token verification path shares this secret, so
        // starting without one would leave the whole auth surface unsigned.
        let session_secret = env::var("SESSION_SECRET").unwrap_or_default();
        if session_secret.trim().is_empty() {
            return Err(anyhow!(
                "SESSION_SECRET environment variable is not set or is empty"
            ));
        }

        let session_ttl_days = parse_env("SESSION_TTL_DAYS", 7);

        let google_client_id = env::var("GOOGLE_CLIENT_ID").ok().filter(|v| !v.is_empty());
        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "Asia/Kolkata".into());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        Ok(Config {
            database_url,
            session_secret,
            session_ttl_days,
            google_client_id,
            redis_url,
            redis_pool_size: parse_env("REDIS_POOL_SIZE", 5),
            redis_connect_timeout: parse_env("REDIS_CONNECT_TIMEOUT", 5),
            rate_limit_auth_max_requests: parse_env("RATE_LIMIT_AUTH_MAX_REQUESTS", 10),
            rate_limit_auth_window_seconds: parse_env("RATE_LIMIT_AUTH_WINDOW_SECONDS", 60),
            rate_limit_global_max_requests: parse_env("RATE_LIMIT_GLOBAL_MAX_REQUESTS", 300),
            rate_limit_global_window_seconds: parse_env("RATE_LIMIT_GLOBAL_WINDOW_SECONDS", 60),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            time_zone,
        })
    }

    /// Cookie lifetime in seconds, derived from the session TTL.
    pub fn session_max_age_secs(&self) -> u64 {
        self.session_ttl_days * 24 * 60 * 60
    }
}

fn parse_env<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".into(),
            session_secret: "test-secret".into(),
            session_ttl_days: 7,
            google_client_id: None,
            redis_url: None,
            redis_pool_size: 5,
            redis_connect_timeout: 5,
            rate_limit_auth_max_requests: 10,
            rate_limit_auth_window_seconds: 60,
            rate_limit_global_max_requests: 300,
            rate_limit_global_window_seconds: 60,
            cookie_secure: false,
            time_zone: chrono_tz::Asia::Kolkata,
        }
    }

    #[test]
    fn session_max_age_is_seven_days_by_default() {
        assert_eq!(test_config().session_max_age_secs(), 604_800);
    }

    #[test]
    fn parse_env_falls_back_to_default() {
        assert_eq!(parse_env("NO_SUCH_TALENT_BRIDGE_VAR", 42u32), 42);
    }
}
