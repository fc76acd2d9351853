//! DTOs for link listings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codegen::CodeStrength;
use crate::domain::entities::Link;

#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub strength: CodeStrength,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkItem {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            short_url,
            long_url: link.long_url,
            strength: link.strength,
            click_count: link.click_count,
            created_at: link.created_at,
            last_accessed_at: link.last_accessed_at,
            expires_at: link.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub total: usize,
    pub items: Vec<LinkItem>,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub deleted: u64,
}
