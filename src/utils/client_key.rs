//! Client key extraction for rate limiting.

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Header set by reverse proxies with the original client chain.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Key used when neither a forwarded address nor a peer address is known.
pub const LOOPBACK_KEY: &str = "127.0.0.1";

/// Derives the rate-limit key for a request.
///
/// Priority:
/// 1. First comma-separated value of `X-Forwarded-For`
/// 2. IP of the direct peer connection
/// 3. [`LOOPBACK_KEY`]
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_key(&headers, None), "203.0.113.7");
/// ```
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(addr) = forwarded {
        return addr.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| LOOPBACK_KEY.to_string())
}

/// Extractor yielding the rate-limit key of the current request.
///
/// Never rejects; falls back to [`LOOPBACK_KEY`] when the server was started
/// without connect info (for example under `axum-test`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self(client_key(&parts.headers, peer)))
    }
}
