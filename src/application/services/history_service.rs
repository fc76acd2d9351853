//! Read and edit access to the shortening history.

use std::sync::Arc;

use serde_json::json;

use crate::domain::history::{HistoryEntry, UrlHistory};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub size: usize,
    pub max_size: usize,
    /// Newest first.
    pub entries: Vec<HistoryEntry>,
}

pub struct HistoryService {
    history: Arc<UrlHistory>,
}

impl HistoryService {
    pub fn new(history: Arc<UrlHistory>) -> Self {
        Self { history }
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        let entries = self.history.entries();
        HistorySnapshot {
            size: entries.len(),
            max_size: self.history.capacity(),
            entries,
        }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the history is empty.
    pub fn latest(&self) -> Result<HistoryEntry, AppError> {
        self.history.peek().ok_or_else(empty_history)
    }

    /// Removes and returns the most recent entry. The stored link is kept.
    pub fn undo_latest(&self) -> Result<HistoryEntry, AppError> {
        self.history.pop().ok_or_else(empty_history)
    }

    pub fn clear(&self) -> usize {
        let cleared = self.history.len();
        self.history.clear();
        cleared
    }
}

fn empty_history() -> AppError {
    AppError::not_found("History is empty", json!({}))
}
