mod common;

use axum_test::TestServer;
use sqlx::PgPool;

#[sqlx::test]
async fn test_list_active_links(pool: PgPool) {
    common::create_test_link(&pool, "one", "https://example.com/1").await;
    common::create_test_link(&pool, "two", "https://example.com/2").await;
    common::create_expired_link(&pool, "old", "https://example.com/3").await;

    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/api/urls").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total"], 2);
    assert_eq!(json["items"][0]["code"], "two");
    assert_eq!(json["items"][0]["short_url"], format!("{}/two", common::BASE_URL));
    assert_eq!(json["items"][1]["code"], "one");
}

#[sqlx::test]
async fn test_top_links(pool: PgPool) {
    let a = common::create_test_link(&pool, "a", "https://example.com/a").await;
    let b = common::create_test_link(&pool, "b", "https://example.com/b").await;
    common::set_click_count(&pool, a, 3).await;
    common::set_click_count(&pool, b, 7).await;

    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/api/urls/top").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total"], 2);
    assert_eq!(json["items"][0]["code"], "b");
    assert_eq!(json["items"][0]["click_count"], 7);
}

#[sqlx::test]
async fn test_top_links_capped_at_ten(pool: PgPool) {
    for i in 0..12 {
        common::create_test_link(&pool, &format!("c{i}"), "https://example.com").await;
    }

    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let json = server.get("/api/urls/top").await.json::<serde_json::Value>();
    assert_eq!(json["total"], 10);
}

#[sqlx::test]
async fn test_delete_expired(pool: PgPool) {
    common::create_test_link(&pool, "live", "https://example.com").await;
    common::create_expired_link(&pool, "dead1", "https://example.com").await;
    common::create_expired_link(&pool, "dead2", "https://example.com").await;

    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.delete("/api/urls/expired").await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["deleted"], 2);

    server.get("/dead1").await.assert_status_not_found();
    assert_eq!(server.get("/live").await.status_code(), 302);
}
