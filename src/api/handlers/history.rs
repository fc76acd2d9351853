//! Handlers for the in-memory shortening history.

use axum::{Json, extract::State};

use crate::api::dto::history::{HistoryClearedResponse, HistoryResponse};
use crate::domain::history::HistoryEntry;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/history` - recent shortenings, newest first.
pub async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(state.history_service.snapshot().into())
}

/// `GET /api/history/latest` - 404 when the history is empty.
pub async fn latest_handler(State(state): State<AppState>) -> Result<Json<HistoryEntry>, AppError> {
    state.history_service.latest().map(Json)
}

/// `DELETE /api/history/latest` - pops the newest entry. The link stays stored.
pub async fn undo_latest_handler(
    State(state): State<AppState>,
) -> Result<Json<HistoryEntry>, AppError> {
    state.history_service.undo_latest().map(Json)
}

/// `DELETE /api/history`
pub async fn clear_history_handler(State(state): State<AppState>) -> Json<HistoryClearedResponse> {
    Json(HistoryClearedResponse {
        cleared: state.history_service.clear(),
    })
}
