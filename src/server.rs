//! HTTP server initialization and runtime setup.
//!
//! Handles the slug store, the creation rate limiter and the Axum server lifecycle.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::SlugRepository;
use crate::infrastructure::persistence::{MemorySlugRepository, PgSlugRepository};
use crate::infrastructure::rate_limit::{MemoryRateLimiter, RateLimiter, RedisRateLimiter};
use crate::application::services::SlugService;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Slug store (PostgreSQL pool with migrations, or in-memory)
/// - Creation rate limiter (Redis, in-memory fallback, or disabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let mut service = SlugService::new(repository);

    if let Some(limiter) = build_rate_limiter(&config).await {
        service = service.with_rate_limiter(limiter, config.rate_limit_timeout());
    }

    let state = AppState::new(Arc::new(service));
    let app = app_router(state, &config.public_origin, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &Config) -> Result<Arc<dyn SlugRepository>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            Ok(Arc::new(MemorySlugRepository::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required when STORAGE=postgres")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgSlugRepository::new(Arc::new(pool))))
        }
    }
}

/// Picks the limiter backend. Redis is preferred when configured; if it is
/// unreachable at startup the per-process limiter is used instead.
async fn build_rate_limiter(config: &Config) -> Option<Arc<dyn RateLimiter>> {
    if !config.rate_limit_enabled {
        tracing::info!("Rate limit disabled");
        return None;
    }

    let limits = config.rate_limit_config();

    if let Some(redis_url) = &config.redis_url {
        match RedisRateLimiter::connect(redis_url, limits).await {
            Ok(redis) => {
                tracing::info!("Rate limit enabled (Redis)");
                return Some(Arc::new(redis));
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory rate limit.", e);
            }
        }
    } else {
        tracing::info!("Rate limit enabled (in-memory)");
    }

    Some(Arc::new(MemoryRateLimiter::new(limits)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
