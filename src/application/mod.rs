//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a single place for validation and business rules.
//!
//! - [`services::link_service::LinkService`] - Shortening, resolution and cleanup
//! - [`services::stats_service::StatsService`] - Click recording and analytics
//! - [`services::history_service::HistoryService`] - Recent shortening history

pub mod services;
