//! Click statistics and analytics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Click, Link, NewClick};
use crate::domain::repositories::{ClickFilter, LinkRepository, StatsRepository};
use crate::error::AppError;

/// Link analytics: the link itself plus a page of its access log.
#[derive(Debug, Clone)]
pub struct LinkAnalytics {
    pub link: Link,
    pub is_expired: bool,
    /// Access records matching the filter's date range.
    pub total_access_records: i64,
    pub access_logs: Vec<Click>,
}

/// Service for recording clicks and reading analytics.
pub struct StatsService<L: LinkRepository, S: StatsRepository> {
    link_repository: Arc<L>,
    stats_repository: Arc<S>,
}

impl<L: LinkRepository, S: StatsRepository> StatsService<L, S> {
    pub fn new(link_repository: Arc<L>, stats_repository: Arc<S>) -> Self {
        Self {
            link_repository,
            stats_repository,
        }
    }

    /// Records a click synchronously.
    ///
    /// Redirects go through the click worker instead; this is the direct path
    /// used by tooling and tests.
    pub async fn record_click(
        &self,
        link_id: i64,
        user_agent: Option<String>,
        referer: Option<String>,
        ip: Option<String>,
    ) -> Result<Click, AppError> {
        let new_click = NewClick {
            link_id,
            user_agent,
            referer,
            ip,
        };

        self.stats_repository.record_click(new_click).await
    }

    /// Analytics for `code`. Expired links are still reported.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn analytics(&self, code: &str, filter: ClickFilter) -> Result<LinkAnalytics, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        let total_access_records = self
            .stats_repository
            .count_clicks(link.id, filter.from_date, filter.to_date)
            .await?;
        let access_logs = self.stats_repository.clicks_for_link(link.id, filter).await?;

        Ok(LinkAnalytics {
            is_expired: link.is_expired(),
            link,
            total_access_records,
            access_logs,
        })
    }
}
