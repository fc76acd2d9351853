//! HTTP request handlers.

pub mod analytics;
pub mod health;
pub mod history;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_handler;
pub use health::health_handler;
pub use history::{clear_history_handler, history_handler, latest_handler, undo_latest_handler};
pub use links::{delete_expired_handler, list_active_handler, top_links_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
