#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use slug_shortener::application::services::SlugService;
use slug_shortener::domain::repositories::SlugRepository;
use slug_shortener::infrastructure::persistence::MemorySlugRepository;
use slug_shortener::infrastructure::rate_limit::{MemoryRateLimiter, RateLimitConfig};
use slug_shortener::routes::build_router;
use slug_shortener::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const PUBLIC_ORIGIN: &str = "https://short.example.com";

/// Injects a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}

/// State over an in-memory store, without a rate limiter.
pub fn create_test_state() -> (AppState, Arc<MemorySlugRepository>) {
    let repository = Arc::new(MemorySlugRepository::new());
    let service = SlugService::new(repository.clone());

    (AppState::new(Arc::new(service)), repository)
}

/// State over an in-memory store with the default fixed-window limiter.
pub fn create_limited_state() -> (AppState, Arc<MemorySlugRepository>) {
    let repository = Arc::new(MemorySlugRepository::new());
    let limiter = Arc::new(MemoryRateLimiter::new(RateLimitConfig::default()));
    let service =
        SlugService::new(repository.clone()).with_rate_limiter(limiter, Duration::from_secs(1));

    (AppState::new(Arc::new(service)), repository)
}

pub fn create_test_app(state: AppState) -> Router {
    build_router(state, PUBLIC_ORIGIN)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(create_test_app(state)).unwrap()
}

pub async fn create_test_link(repository: &MemorySlugRepository, slug: &str, url: &str) {
    repository.create(slug, url).await.unwrap();
}
