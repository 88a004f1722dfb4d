//! In-process fixed-window rate limiter.

use super::service::{RateDecision, RateLimitConfig, RateLimitError, RateLimiter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Number of tracked keys above which stale windows are pruned.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    index: u64,
    count: u64,
}

/// Rate limiter keeping counters in a process-local map.
///
/// Windows are aligned to multiples of the window length measured from the
/// limiter's creation, so all keys roll over at the same instants. Counters
/// are not shared between instances; use [`super::RedisRateLimiter`] when
/// running more than one.
pub struct MemoryRateLimiter {
    config: RateLimitConfig,
    epoch: Instant,
    windows: Mutex<HashMap<String, Window>>,
}

impl MemoryRateLimiter {
    /// Creates a limiter with the given limits.
    pub fn new(config: RateLimitConfig) -> Self {
        debug!(
            "Using in-memory rate limiter ({} requests / {:?})",
            config.max_requests, config.window
        );
        Self {
            config,
            epoch: Instant::now(),
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn window_position(&self) -> (u64, std::time::Duration) {
        let window_nanos = self.config.window.as_nanos().max(1);
        let elapsed = Instant::now().duration_since(self.epoch).as_nanos();
        let index = (elapsed / window_nanos) as u64;
        let into_window = elapsed % window_nanos;
        let reset_after =
            std::time::Duration::from_nanos((window_nanos - into_window) as u64);
        (index, reset_after)
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateDecision, RateLimitError> {
        let (index, reset_after) = self.window_position();

        let mut windows = self
            .windows
            .lock()
            .map_err(|e| RateLimitError::Backend(format!("limiter state poisoned: {e}")))?;

        if windows.len() > PRUNE_THRESHOLD {
            windows.retain(|_, w| w.index == index);
        }

        let window = windows
            .entry(key.to_string())
            .or_insert(Window { index, count: 0 });

        if window.index != index {
            *window = Window { index, count: 0 };
        }
        window.count += 1;

        Ok(RateDecision::from_count(
            window.count,
            self.config.max_requests,
            reset_after,
        ))
    }

    async fn health_check(&self) -> bool {
        self.windows.lock().is_ok()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
