//! Edge rate limiting using the token bucket algorithm.
//!
//! This is a flood guard for the whole router. The per-client creation quota
//! is enforced separately by [`crate::infrastructure::rate_limit`].

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Sustained requests per second allowed per IP.
const PER_SECOND: u64 = 5;

/// Burst size per IP.
const BURST_SIZE: u32 = 100;

/// Creates the edge limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 5 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
/// Requires the server to be started with connect info.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("edge rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates the edge limiter for deployments behind a trusted reverse proxy.
///
/// Keys on `X-Forwarded-For`, `X-Real-IP` or `Forwarded`, falling back to the
/// peer address. Enable only when the proxy overwrites these headers.
pub fn proxy_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("edge rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
