//! Fixed-window rate limiting for slug creation.
//!
//! Provides a [`RateLimiter`] trait with two implementations:
//! - [`RedisRateLimiter`] - Shared counters in Redis, for multi-instance deployments
//! - [`MemoryRateLimiter`] - Per-process counters, for single instances and tests

mod memory_limiter;
mod redis_limiter;
mod service;

pub use memory_limiter::MemoryRateLimiter;
pub use redis_limiter::RedisRateLimiter;
pub use service::{RateDecision, RateLimitConfig, RateLimitError, RateLimiter};

#[cfg(test)]
pub use service::MockRateLimiter;
