//! DTOs for the shortening history.

use serde::Serialize;

use crate::application::services::HistorySnapshot;
use crate::domain::history::HistoryEntry;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history_size: usize,
    pub max_size: usize,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
}

impl From<HistorySnapshot> for HistoryResponse {
    fn from(snapshot: HistorySnapshot) -> Self {
        Self {
            history_size: snapshot.size,
            max_size: snapshot.max_size,
            history: snapshot.entries,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryClearedResponse {
    pub cleared: usize,
}
