//! Sliding-window admission control backed by Redis sorted sets.
//!
//! Each key holds one marker per admitted request, scored by its timestamp
//! in milliseconds. A request is admitted when fewer than `limit` markers
//! remain inside the window; a denied request does not consume quota. Any
//! failure talking to Redis fails open: throttling is a protection, not a
//! dependency, and callers must not be blocked by an outage of it.

use crate::db::redis::RedisPool;
use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};

#[async_trait]
pub trait RateLimit: Send + Sync {
    /// Per-client admission, keyed by e.g. the caller's IP.
    async fn allow(&self, key: &str, limit: u32, window_secs: u64) -> bool;
    /// Global admission shared by all callers of one API.
    async fn allow_global(&self, api_name: &str, limit: u32, window_secs: u64) -> bool;
}

#[derive(Clone)]
pub struct RateLimiter {
    pool: RedisPool,
}

impl RateLimiter {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    async fn check(&self, redis_key: String, limit: u32, window_secs: u64) -> bool {
        match self.try_check(&redis_key, limit, window_secs).await {
            Ok(allowed) => allowed,
            Err(err) => {
                tracing::error!(key = %redis_key, error = %err, "Rate limiter unavailable, failing open");
                true
            }
        }
    }

    async fn try_check(&self, key: &str, limit: u32, window_secs: u64) -> anyhow::Result<bool> {
        let now_ms = Utc::now().timestamp_millis();
        let start_ms = window_start_ms(now_ms, window_secs);

        let mut conn = self.pool.get().await?;

        // Drop markers that slid out of the window, then count what is left.
        let _removed: i64 = conn.zrembyscore(key, 0i64, start_ms).await?;
        let count: i64 = conn.zcard(key).await?;
        if count >= i64::from(limit) {
            return Ok(false);
        }

        let _added: i64 = conn.zadd(key, new_member(now_ms), now_ms).await?;
        // Refresh expiry so abandoned keys do not accumulate forever.
        let _: bool = conn.expire(key, window_secs as i64).await?;

        Ok(true)
    }
}

#[async_trait]
impl RateLimit for RateLimiter {
    async fn allow(&self, key: &str, limit: u32, window_secs: u64) -> bool {
        self.check(format!("rl:{}", key), limit, window_secs).await
    }

    async fn allow_global(&self, api_name: &str, limit: u32, window_secs: u64) -> bool {
        let allowed = self
            .check(format!("rl:global:{}", api_name), limit, window_secs)
            .await;
        if !allowed {
            tracing::warn!(api = api_name, limit, "Global rate limit exceeded");
        }
        allowed
    }
}

fn window_start_ms(now_ms: i64, window_secs: u64) -> i64 {
    now_ms - (window_secs as i64) * 1000
}

/// Marker member: timestamp plus a random suffix so two requests landing on
/// the same millisecond do not collide.
fn new_member(now_ms: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{}-{}", now_ms, suffix)
}
