//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Testing
//!
//! See `tests/repository_slug.rs` for the PostgreSQL contract tests.

pub mod slug_repository;

pub use slug_repository::SlugRepository;

#[cfg(test)]
pub use slug_repository::MockSlugRepository;
