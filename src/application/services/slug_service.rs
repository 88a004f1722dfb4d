//! Slug checking, creation and resolution.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::ShortLink;
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;
use crate::infrastructure::rate_limit::{RateLimitError, RateLimiter};
use crate::utils::slug_generator::generate_slug;
use crate::utils::slug_validator::validate_slug;
use crate::utils::url_normalizer::normalize_url;

/// Default budget for one rate limiter call.
pub const DEFAULT_LIMITER_TIMEOUT: Duration = Duration::from_secs(1);

/// Attempts made by [`SlugService::suggest_slug`] before giving up.
const MAX_SUGGEST_ATTEMPTS: usize = 10;

/// Result of a slug availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlugCheck {
    pub used: bool,
}

/// Service orchestrating the slug store and the optional rate limiter.
///
/// Holds no row data between calls; every check and resolve is a live store
/// query.
///
/// # Rate limiter failures
///
/// Only an explicit "allowed" answer lets a creation through. A backend error
/// or a call exceeding the timeout is logged and the creation fails with
/// [`AppError::Internal`], so an unreachable limiter never turns into
/// unlimited creations.
pub struct SlugService {
    repository: Arc<dyn SlugRepository>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    limiter_timeout: Duration,
}

impl SlugService {
    /// Creates a service without rate limiting.
    pub fn new(repository: Arc<dyn SlugRepository>) -> Self {
        Self {
            repository,
            rate_limiter: None,
            limiter_timeout: DEFAULT_LIMITER_TIMEOUT,
        }
    }

    /// Attaches a rate limiter consulted on every creation.
    pub fn with_rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiter>, timeout: Duration) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self.limiter_timeout = timeout;
        self
    }

    /// Returns the configured rate limiter, if any.
    pub fn rate_limiter(&self) -> Option<&Arc<dyn RateLimiter>> {
        self.rate_limiter.as_ref()
    }

    /// Reports whether a slug is already taken.
    ///
    /// Validates format first, then runs a single existence query. No state
    /// is changed and the rate limiter is not consulted, so it is safe to
    /// call on every keystroke.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidSlug`] for malformed input.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn check_slug(&self, candidate: &str) -> Result<SlugCheck, AppError> {
        let slug = validate_slug(candidate)?;
        let used = self.repository.exists(slug.as_str()).await?;

        debug!(slug = %slug, used, "Slug checked");

        Ok(SlugCheck { used })
    }

    /// Creates a new slug mapping.
    ///
    /// # Steps
    ///
    /// 1. Validate slug format
    /// 2. Normalize the destination URL
    /// 3. Consult the rate limiter for `client_key` (if configured)
    /// 4. Insert through the store, which is the authoritative uniqueness gate
    ///
    /// A collision is not retried and no alternative slug is proposed.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSlug`] / [`AppError::InvalidUrl`] for bad input
    /// - [`AppError::RateLimited`] when the client exhausted its window
    /// - [`AppError::DuplicateSlug`] when the slug is taken
    /// - [`AppError::Internal`] on store or limiter failures
    pub async fn create_slug(
        &self,
        candidate: &str,
        raw_url: &str,
        client_key: &str,
    ) -> Result<(), AppError> {
        let slug = validate_slug(candidate)?;
        let url = normalize_url(raw_url)?;

        self.enforce_rate_limit(client_key).await?;

        let link = self.repository.create(slug.as_str(), &url).await?;

        info!(slug = %link.slug, url = %link.url, "Short link created");

        Ok(())
    }

    /// Resolves a slug to its stored mapping.
    ///
    /// Malformed slugs are rejected before reaching the store.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSlug`] for malformed input
    /// - [`AppError::NotFound`] when no mapping exists
    /// - [`AppError::Internal`] on store errors
    pub async fn resolve_slug(&self, candidate: &str) -> Result<ShortLink, AppError> {
        let slug = validate_slug(candidate)?;

        self.repository
            .find_by_slug(slug.as_str())
            .await?
            .ok_or_else(|| AppError::not_found("slug not found", json!({ "slug": slug.as_str() })))
    }

    /// Proposes a random word slug that is currently unused.
    ///
    /// Availability is only a snapshot; a later creation may still collide.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if every attempt collided or the store failed.
    pub async fn suggest_slug(&self) -> Result<String, AppError> {
        for _ in 0..MAX_SUGGEST_ATTEMPTS {
            let slug = generate_slug();

            if !self.repository.exists(&slug).await? {
                return Ok(slug);
            }
        }

        Err(AppError::internal(
            "Failed to generate unused slug",
            json!({ "reason": "Too many collisions", "attempts": MAX_SUGGEST_ATTEMPTS }),
        ))
    }

    /// Verifies the store is reachable.
    pub async fn store_health(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn enforce_rate_limit(&self, client_key: &str) -> Result<(), AppError> {
        let Some(limiter) = &self.rate_limiter else {
            return Ok(());
        };

        let outcome = tokio::time::timeout(self.limiter_timeout, limiter.check(client_key))
            .await
            .unwrap_or(Err(RateLimitError::Timeout(self.limiter_timeout)));

        match outcome {
            Ok(decision) if decision.allowed => Ok(()),
            Ok(decision) => {
                warn!(client = client_key, "Rate limit exceeded");
                Err(AppError::rate_limited(Some(decision.reset_after)))
            }
            Err(e) => {
                error!(
                    client = client_key,
                    backend = limiter.backend(),
                    "Rate limiter unavailable, rejecting request: {}",
                    e
                );
                Err(AppError::internal(
                    "Rate limiter unavailable",
                    json!({ "reason": e.to_string() }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockSlugRepository;
    use crate::infrastructure::persistence::MemorySlugRepository;
    use crate::infrastructure::rate_limit::{
        MemoryRateLimiter, MockRateLimiter, RateDecision, RateLimitConfig,
    };
    use chrono::Utc;

    fn create_test_link(slug: &str, url: &str) -> ShortLink {
        ShortLink::new(slug.to_string(), url.to_string(), Utc::now())
    }

    fn memory_service() -> SlugService {
        SlugService::new(Arc::new(MemorySlugRepository::new()))
    }

    fn limited_service() -> SlugService {
        memory_service().with_rate_limiter(
            Arc::new(MemoryRateLimiter::new(RateLimitConfig::default())),
            DEFAULT_LIMITER_TIMEOUT,
        )
    }

    #[tokio::test]
    async fn test_check_slug_unused() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo
            .expect_exists()
            .withf(|slug| slug == "fresh")
            .times(1)
            .returning(|_| Ok(false));

        let service = SlugService::new(Arc::new(mock_repo));

        assert_eq!(
            service.check_slug("fresh").await.unwrap(),
            SlugCheck { used: false }
        );
    }

    #[tokio::test]
    async fn test_check_slug_rejects_invalid_before_store() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo.expect_exists().times(0);

        let service = SlugService::new(Arc::new(mock_repo));

        let err = service.check_slug("not valid").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSlug { .. }));
    }

    #[tokio::test]
    async fn test_check_slug_is_idempotent() {
        let service = memory_service();
        service
            .create_slug("taken", "example.com", "k")
            .await
            .unwrap();

        for _ in 0..5 {
            assert!(service.check_slug("taken").await.unwrap().used);
            assert!(!service.check_slug("free").await.unwrap().used);
        }
    }

    #[tokio::test]
    async fn test_create_then_resolve_round_trip() {
        let service = memory_service();

        service
            .create_slug("abc-1", "https://example.com", "k")
            .await
            .unwrap();

        let link = service.resolve_slug("abc-1").await.unwrap();
        assert_eq!(link.slug, "abc-1");
        assert_eq!(link.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_stores_normalized_url() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo
            .expect_create()
            .withf(|slug, url| slug == "docs" && url == "https://docs.rs")
            .times(1)
            .returning(|slug, url| Ok(create_test_link(slug, url)));

        let service = SlugService::new(Arc::new(mock_repo));

        service.create_slug("docs", "docs.rs", "k").await.unwrap();
    }

    #[tokio::test]
    async fn test_create_invalid_url_skips_store() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo.expect_create().times(0);

        let service = SlugService::new(Arc::new(mock_repo));

        let err = service
            .create_slug("ok", "nodothost", "k")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_create_invalid_slug_checked_before_url() {
        let service = memory_service();

        let err = service
            .create_slug("bad/slug", "nodothost", "k")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSlug { .. }));
    }

    #[tokio::test]
    async fn test_create_duplicate_is_reported() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|slug, _| Err(AppError::duplicate_slug(slug)));

        let service = SlugService::new(Arc::new(mock_repo));

        let err = service
            .create_slug("taken", "https://example.com", "k")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateSlug { ref slug } if slug == "taken"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_same_slug() {
        let service = Arc::new(memory_service());

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.create_slug("race", "a.com", "a").await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.create_slug("race", "b.com", "b").await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(AppError::DuplicateSlug { .. })))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 1);
    }

    #[tokio::test]
    async fn test_resolve_missing_is_not_found() {
        let service = memory_service();

        let err = service.resolve_slug("missing-slug").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_error_info().message, "slug not found");
    }

    #[tokio::test]
    async fn test_resolve_validates_before_store() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo.expect_find_by_slug().times(0);

        let service = SlugService::new(Arc::new(mock_repo));

        let err = service.resolve_slug("../etc").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSlug { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_eleventh_create_is_rate_limited() {
        let service = limited_service();

        for i in 0..10 {
            service
                .create_slug(&format!("slug-{i}"), "example.com", "203.0.113.9")
                .await
                .unwrap();
        }

        let err = service
            .create_slug("slug-10", "example.com", "203.0.113.9")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RateLimited { .. }));

        // Another client is unaffected.
        service
            .create_slug("slug-other", "example.com", "198.51.100.2")
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;

        service
            .create_slug("slug-10", "example.com", "203.0.113.9")
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_slug_does_not_consume_rate_limit() {
        let service = limited_service();

        for _ in 0..50 {
            service.check_slug("anything").await.unwrap();
        }

        service
            .create_slug("anything", "example.com", "127.0.0.1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rate_limited_create_skips_store() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo.expect_create().times(0);

        let mut mock_limiter = MockRateLimiter::new();
        mock_limiter.expect_check().times(1).returning(|_| {
            Ok(RateDecision {
                allowed: false,
                remaining: 0,
                reset_after: Duration::from_secs(3),
            })
        });

        let service = SlugService::new(Arc::new(mock_repo))
            .with_rate_limiter(Arc::new(mock_limiter), DEFAULT_LIMITER_TIMEOUT);

        let err = service
            .create_slug("slug", "example.com", "k")
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::RateLimited { retry_after: Some(d) } if d == Duration::from_secs(3))
        );
    }

    #[tokio::test]
    async fn test_limiter_error_fails_closed() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo.expect_create().times(0);

        let mut mock_limiter = MockRateLimiter::new();
        mock_limiter
            .expect_check()
            .times(1)
            .returning(|_| Err(RateLimitError::Backend("connection refused".to_string())));
        mock_limiter.expect_backend().return_const("mock");

        let service = SlugService::new(Arc::new(mock_repo))
            .with_rate_limiter(Arc::new(mock_limiter), DEFAULT_LIMITER_TIMEOUT);

        let err = service
            .create_slug("slug", "example.com", "k")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    struct StalledLimiter;

    #[async_trait::async_trait]
    impl RateLimiter for StalledLimiter {
        async fn check(&self, _key: &str) -> Result<RateDecision, RateLimitError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("timeout should fire first")
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn backend(&self) -> &'static str {
            "stalled"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_limiter_timeout_fails_closed() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo.expect_create().times(0);

        let service = SlugService::new(Arc::new(mock_repo))
            .with_rate_limiter(Arc::new(StalledLimiter), DEFAULT_LIMITER_TIMEOUT);

        let err = service
            .create_slug("slug", "example.com", "k")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_suggest_slug_skips_used() {
        let mut mock_repo = MockSlugRepository::new();
        let mut calls = 0;
        mock_repo.expect_exists().times(3).returning(move |_| {
            calls += 1;
            Ok(calls < 3)
        });

        let service = SlugService::new(Arc::new(mock_repo));

        let slug = service.suggest_slug().await.unwrap();
        assert!(validate_slug(&slug).is_ok());
    }

    #[tokio::test]
    async fn test_suggest_slug_gives_up() {
        let mut mock_repo = MockSlugRepository::new();
        mock_repo
            .expect_exists()
            .times(MAX_SUGGEST_ATTEMPTS)
            .returning(|_| Ok(true));

        let service = SlugService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.suggest_slug().await,
            Err(AppError::Internal { .. })
        ));
    }
}
