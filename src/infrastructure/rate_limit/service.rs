//! Rate limiter trait and shared types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors raised by a limiter backend.
///
/// Callers treat every variant as "no conclusive answer".
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("rate limiter backend error: {0}")]
    Backend(String),

    #[error("rate limiter did not answer within {0:?}")]
    Timeout(Duration),
}

/// Limits applied per client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub max_requests: u32,
    /// Window length; counters reset at multiples of this duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(10),
        }
    }
}

/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// Time until the current window closes.
    pub reset_after: Duration,
}

impl RateDecision {
    /// Builds a decision from the post-increment hit count of a window.
    pub fn from_count(count: u64, max_requests: u32, reset_after: Duration) -> Self {
        let max = u64::from(max_requests);
        Self {
            allowed: count <= max,
            remaining: max.saturating_sub(count) as u32,
            reset_after,
        }
    }
}

/// Fixed-window request counter keyed by client.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::RedisRateLimiter`] - Redis `INCR` + `EXPIRE`
/// - [`crate::infrastructure::rate_limit::MemoryRateLimiter`] - in-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records one hit for `key` and reports whether it is within the limit.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Backend`] if the backend cannot be reached.
    async fn check(&self, key: &str) -> Result<RateDecision, RateLimitError>;

    /// Checks if the backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
