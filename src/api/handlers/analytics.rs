//! Handler for per-link analytics.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::analytics::{AnalyticsResponse, PaginationMeta};
use crate::api::dto::pagination::{AnalyticsQueryParams, DEFAULT_PAGE_SIZE};
use crate::domain::repositories::ClickFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click totals and the access log of one link.
///
/// # Endpoint
///
/// `GET /api/analytics/{code}?page=1&page_size=100&from=...&to=...`
///
/// Expired links are still reported, with `is_expired: true`. The access log
/// is newest first; `from`/`to` are RFC 3339 timestamps.
///
/// # Errors
///
/// Returns 400 for bad paging or date parameters and 404 for an unknown code.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<AnalyticsQueryParams>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request("Invalid pagination", json!({ "reason": e })))?;

    let (from, to) = (params.date_filter.from, params.date_filter.to);
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::bad_request(
                "'from' must not be after 'to'",
                json!({ "from": from, "to": to }),
            ));
        }
    }

    let filter = ClickFilter::new(offset, limit).with_date_range(from, to);
    let analytics = state.stats_service.analytics(&code, filter).await?;
    let link = analytics.link;

    Ok(Json(AnalyticsResponse {
        short_url: state.link_service.short_url(&link.code),
        code: link.code,
        long_url: link.long_url,
        strength: link.strength,
        total_clicks: link.click_count,
        created_at: link.created_at,
        last_accessed_at: link.last_accessed_at,
        expires_at: link.expires_at,
        is_expired: analytics.is_expired,
        total_access_records: analytics.total_access_records,
        pagination: PaginationMeta::new(
            params.pagination.page.unwrap_or(1),
            params.pagination.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            analytics.total_access_records,
        ),
        access_logs: analytics.access_logs.into_iter().map(Into::into).collect(),
    }))
}
