//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;

use crate::codegen::base62::is_valid_code;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **302 Found** with `Location` set to the long URL
/// - **404 Not Found** for an unknown code or one outside the base-62 alphabet
/// - **410 Gone** for an expired link
///
/// # Click Tracking
///
/// A click event is queued for the background worker without waiting. When
/// the queue is full the click is dropped and the redirect still succeeds.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let link = state.link_service.resolve(&code).await?;
    let location = HeaderValue::try_from(link.long_url.as_str()).map_err(|_| {
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "code": code }),
        )
    })?;

    let click_event = ClickEvent::new(
        link.id,
        code,
        Some(client_ip(&headers, addr, state.behind_proxy)),
        headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    match state.click_sender.try_send(click_event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            tracing::warn!(code = %event.code, "click queue full, dropping click");
        }
        Err(TrySendError::Closed(event)) => {
            tracing::error!(code = %event.code, "click queue closed");
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
