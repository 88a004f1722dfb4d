//! HTTP middleware for request processing and protection.
//!
//! - [`rate_limit`] - Coarse per-IP token bucket in front of every route
//! - [`tracing`] - Request/response spans

pub mod rate_limit;
pub mod tracing;
