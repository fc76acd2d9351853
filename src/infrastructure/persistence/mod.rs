//! PostgreSQL repository implementations.
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgStatsRepository`] - Click recording and access logs

pub mod pg_link_repository;
pub mod pg_stats_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_stats_repository::PgStatsRepository;
