//! Top-level router.
//!
//! - `GET  /{code}`  - Short link redirect
//! - `GET  /health`  - Health check: DB, click queue, code hash mode
//! - `/api/*`        - REST API, see [`crate::api::routes`]
//!
//! Every request is traced and trailing slashes are trimmed before routing.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::rate_limit::ShortenRateLimit;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The redirect and shorten routes need `ConnectInfo<SocketAddr>`; serve the
/// router with `into_make_service_with_connect_info`.
pub fn app_router(state: AppState, shorten_limit: ShortenRateLimit) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes(shorten_limit))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
