mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use hashed_shortener::api::handlers::health_handler;
use hashed_shortener::codegen::HashMode;
use hashed_shortener::state::ServiceOptions;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert_eq!(json["checks"]["codegen"]["status"], "ok");
}

#[sqlx::test]
async fn test_health_warns_in_weak_only_mode(pool: PgPool) {
    let options = ServiceOptions {
        hash_mode: HashMode::WeakOnly,
        ..common::test_options()
    };
    let (state, _rx) = common::create_test_state_with(pool, options);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["codegen"]["status"], "warn");
}

#[sqlx::test]
async fn test_health_reports_closed_click_queue(pool: PgPool) {
    let (state, rx) = common::create_test_state(pool);
    drop(rx);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
}
