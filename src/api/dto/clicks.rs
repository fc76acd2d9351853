//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Click;

/// One access log record. Missing client metadata is omitted.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub accessed_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            accessed_at: click.clicked_at,
            user_agent: click.user_agent,
            referer: click.referer,
            ip: click.ip,
        }
    }
}
