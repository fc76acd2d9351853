//! API route configuration.

use crate::api::handlers::{
    analytics_handler, clear_history_handler, delete_expired_handler, history_handler,
    latest_handler, list_active_handler, shorten_handler, top_links_handler, undo_latest_handler,
};
use crate::api::middleware::rate_limit::ShortenRateLimit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Routes nested under `/api`.
///
/// - `POST   /shorten`          - Shorten a batch of URLs (rate limited)
/// - `GET    /urls`             - Active links, newest first
/// - `GET    /urls/top`         - Ten most clicked active links
/// - `DELETE /urls/expired`     - Remove expired links
/// - `GET    /analytics/{code}` - Click totals and access log
/// - `GET    /history`          - Recent shortenings
/// - `GET    /history/latest`   - Most recent shortening
/// - `DELETE /history/latest`   - Pop the most recent shortening
/// - `DELETE /history`          - Clear the history
pub fn api_routes(shorten_limit: ShortenRateLimit) -> Router<AppState> {
    let limited = shorten_limit.apply(Router::new().route("/shorten", post(shorten_handler)));

    Router::new()
        .merge(limited)
        .route("/urls", get(list_active_handler))
        .route("/urls/top", get(top_links_handler))
        .route("/urls/expired", delete(delete_expired_handler))
        .route("/analytics/{code}", get(analytics_handler))
        .route("/history", get(history_handler).delete(clear_history_handler))
        .route(
            "/history/latest",
            get(latest_handler).delete(undo_latest_handler),
        )
}
