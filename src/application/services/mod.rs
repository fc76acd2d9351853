//! Business logic services for the application layer.

pub mod history_service;
pub mod link_service;
pub mod stats_service;

pub use history_service::{HistoryService, HistorySnapshot};
pub use link_service::LinkService;
pub use stats_service::{LinkAnalytics, StatsService};
