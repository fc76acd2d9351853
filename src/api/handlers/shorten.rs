//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{
    BatchSummary, ShortenRequest, ShortenResponse, ShortenResultItem, UrlItem,
};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates short codes for one or more long URLs.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "urls": [
///     { "url": "https://example.com/a/very/long/path" },
///     { "url": "https://example.com/promo", "expires_at": "2030-01-01T00:00:00Z" }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 2, "successful": 2, "failed": 0 },
///   "items": [
///     {
///       "long_url": "https://example.com/a/very/long/path",
///       "code": "I13pXxnD",
///       "short_url": "http://localhost:3000/I13pXxnD",
///       "strength": "strong"
///     }
///   ]
/// }
/// ```
///
/// URLs are processed independently; a failure is reported in its item and
/// does not stop the rest of the batch.
///
/// # Errors
///
/// Returns 400 Bad Request if the request body fails validation.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let total = payload.urls.len();
    let mut items = Vec::with_capacity(total);
    let mut successful = 0;

    for item in payload.urls {
        let long_url = item.url.clone();

        match shorten_one(&state, item).await {
            Ok(link) => {
                successful += 1;
                items.push(ShortenResultItem::Success {
                    short_url: state.link_service.short_url(&link.code),
                    long_url,
                    code: link.code,
                    strength: link.strength,
                    expires_at: link.expires_at,
                });
            }
            Err(err) => {
                items.push(ShortenResultItem::Error {
                    long_url,
                    error: err.to_error_info(),
                });
            }
        }
    }

    Ok(Json(ShortenResponse {
        summary: BatchSummary {
            total,
            successful,
            failed: total - successful,
        },
        items,
    }))
}

async fn shorten_one(state: &AppState, item: UrlItem) -> Result<Link, AppError> {
    state.link_service.shorten(&item.url, item.expires_at).await
}
