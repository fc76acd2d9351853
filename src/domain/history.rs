//! Bounded in-memory history of recently shortened URLs.
//!
//! The history is a stack: the newest entry is on top and pushing onto a full
//! stack drops the oldest entry from the bottom. It lives only as long as the
//! process.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codegen::CodeStrength;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub long_url: String,
    pub code: String,
    pub strength: CodeStrength,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(long_url: String, code: String, strength: CodeStrength) -> Self {
        Self {
            long_url,
            code,
            strength,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug)]
pub struct UrlHistory {
    capacity: usize,
    // front = oldest, back = newest
    entries: Mutex<VecDeque<HistoryEntry>>,
}

impl UrlHistory {
    /// Creates an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Pushes `entry` on top, evicting the oldest entry when full.
    pub fn push(&self, entry: HistoryEntry) {
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn pop(&self) -> Option<HistoryEntry> {
        self.lock().pop_back()
    }

    pub fn peek(&self) -> Option<HistoryEntry> {
        self.lock().back().cloned()
    }

    /// All entries, newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Entries are plain data; a panic mid-push cannot leave them inconsistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for UrlHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
