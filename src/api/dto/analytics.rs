//! DTOs for per-link analytics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::codegen::CodeStrength;

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let size = i64::from(page_size.max(1));
        Self {
            page,
            page_size,
            total_items,
            total_pages: (total_items + size - 1) / size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub strength: CodeStrength,
    pub total_clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
    pub total_access_records: i64,
    pub pagination: PaginationMeta,
    pub access_logs: Vec<ClickInfo>,
}
