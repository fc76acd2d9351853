//! Handlers for link listings and cleanup.

use axum::{Json, extract::State};

use crate::api::dto::links::{CleanupResponse, LinkItem, LinkListResponse};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/urls` - links that have not expired, newest first.
pub async fn list_active_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_active().await?;
    Ok(Json(to_list(&state, links)))
}

/// `GET /api/urls/top` - the ten most clicked links that have not expired.
pub async fn top_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.top_links().await?;
    Ok(Json(to_list(&state, links)))
}

/// `DELETE /api/urls/expired` - removes expired links and their clicks.
pub async fn delete_expired_handler(
    State(state): State<AppState>,
) -> Result<Json<CleanupResponse>, AppError> {
    let deleted = state.link_service.delete_expired().await?;
    Ok(Json(CleanupResponse { deleted }))
}

fn to_list(state: &AppState, links: Vec<Link>) -> LinkListResponse {
    let items: Vec<LinkItem> = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkItem::from_link(link, short_url)
        })
        .collect();

    LinkListResponse {
        total: items.len(),
        items,
    }
}
