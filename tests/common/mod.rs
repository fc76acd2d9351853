#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use axum::routing::get;
use hashed_shortener::api::handlers::{health_handler, redirect_handler};
use hashed_shortener::api::middleware::rate_limit::{self, ShortenRateLimit};
use hashed_shortener::api::routes::api_routes;
use hashed_shortener::domain::click_event::ClickEvent;
use hashed_shortener::state::{AppState, ServiceOptions};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const BASE_URL: &str = "http://s.test";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (code, long_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_expired_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (code, long_url, expires_at) VALUES ($1, $2, NOW() - INTERVAL '1 hour') RETURNING id",
    )
    .bind(code)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_click(pool: &PgPool, link_id: i64, ip: &str) {
    sqlx::query("INSERT INTO link_clicks (link_id, ip) VALUES ($1, $2)")
        .bind(link_id)
        .bind(ip)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn set_click_count(pool: &PgPool, link_id: i64, clicks: i64) {
    sqlx::query("UPDATE links SET click_count = $2 WHERE id = $1")
        .bind(link_id)
        .bind(clicks)
        .execute(pool)
        .await
        .unwrap();
}

pub fn test_options() -> ServiceOptions {
    ServiceOptions {
        base_url: BASE_URL.to_string(),
        ..ServiceOptions::default()
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with(pool, test_options())
}

pub fn create_test_state_with(
    pool: PgPool,
    options: ServiceOptions,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let state = AppState::new(Arc::new(pool), tx, options);
    (state, rx)
}

/// Full route table with a generous shorten limit and a fixed peer address.
pub fn test_app(state: AppState) -> Router {
    test_app_with_limit(state, rate_limit::layer(1, 1000, false).unwrap())
}

pub fn test_app_with_limit(state: AppState, shorten_limit: ShortenRateLimit) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_routes(shorten_limit))
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
