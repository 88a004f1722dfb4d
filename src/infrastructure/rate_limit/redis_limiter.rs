//! Redis-backed fixed-window rate limiter.

use super::service::{RateDecision, RateLimitConfig, RateLimitError, RateLimiter};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Rate limiter storing one counter per client key and window in Redis.
///
/// Keys look like `ratelimit:{client}:{window_index}` where the index is the
/// Unix time divided by the window length, so every instance sharing the
/// Redis server agrees on window boundaries. Each key expires once its window
/// has passed.
pub struct RedisRateLimiter {
    client: ConnectionManager,
    config: RateLimitConfig,
    key_prefix: String,
}

impl RedisRateLimiter {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Backend`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, config: RateLimitConfig) -> Result<Self, RateLimitError> {
        info!("Connecting rate limiter to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            RateLimitError::Backend(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| RateLimitError::Backend(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| RateLimitError::Backend(format!("Redis PING failed: {}", e)))?;

        info!("Rate limiter connected to Redis");

        Ok(Self {
            client: manager,
            config,
            key_prefix: "ratelimit:".to_string(),
        })
    }

    fn build_key(&self, client_key: &str, window_index: u64) -> String {
        format!("{}{}:{}", self.key_prefix, client_key, window_index)
    }
}

/// Returns the current window index and the time left in it.
fn window_position(now: Duration, window: Duration) -> (u64, Duration) {
    let window_secs = window.as_secs().max(1);
    let now_secs = now.as_secs();
    let index = now_secs / window_secs;
    let reset_after = Duration::from_secs(window_secs - now_secs % window_secs);
    (index, reset_after)
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &str) -> Result<RateDecision, RateLimitError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| RateLimitError::Backend(format!("system clock error: {}", e)))?;
        let (index, reset_after) = window_position(now, self.config.window);
        let redis_key = self.build_key(key, index);
        let ttl = self.config.window.as_secs().max(1) as i64;

        let mut conn = self.client.clone();
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .incr(&redis_key, 1u64)
            .expire(&redis_key, ttl)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(format!("Redis INCR failed: {}", e)))?;

        debug!("Rate limit {} -> {}/{}", redis_key, count, self.config.max_requests);

        Ok(RateDecision::from_count(
            count,
            self.config.max_requests,
            reset_after,
        ))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
