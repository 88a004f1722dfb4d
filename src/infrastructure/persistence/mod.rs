//! Slug store implementations.
//!
//! - [`PgSlugRepository`] - PostgreSQL via SQLx, used in production
//! - [`MemorySlugRepository`] - mutex-guarded map for tests and local runs

pub mod memory_slug_repository;
pub mod pg_slug_repository;

pub use memory_slug_repository::MemorySlugRepository;
pub use pg_slug_repository::PgSlugRepository;
