mod common;

use chrono::{Duration, Utc};
use hashed_shortener::domain::click_event::ClickEvent;
use hashed_shortener::domain::click_worker::run_click_worker;
use hashed_shortener::domain::entities::NewClick;
use hashed_shortener::domain::repositories::{ClickFilter, LinkRepository, StatsRepository};
use hashed_shortener::error::AppError;
use hashed_shortener::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

fn click(link_id: i64, ip: &str) -> NewClick {
    NewClick {
        link_id,
        user_agent: Some("test-agent".to_string()),
        referer: None,
        ip: Some(ip.to_string()),
    }
}

#[sqlx::test]
async fn test_record_click_updates_link(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "clk1", "https://example.com").await;
    let pool = Arc::new(pool);
    let stats = PgStatsRepository::new(Arc::clone(&pool));
    let links = PgLinkRepository::new(pool);

    let recorded = stats.record_click(click(link_id, "10.0.0.1")).await.unwrap();
    assert_eq!(recorded.link_id, link_id);
    assert_eq!(recorded.ip.as_deref(), Some("10.0.0.1"));

    stats.record_click(click(link_id, "10.0.0.2")).await.unwrap();

    let link = links.find_by_code("clk1").await.unwrap().unwrap();
    assert_eq!(link.click_count, 2);
    assert!(link.last_accessed_at.is_some());
}

#[sqlx::test]
async fn test_record_click_for_missing_link(pool: PgPool) {
    let stats = PgStatsRepository::new(Arc::new(pool));

    let result = stats.record_click(click(999_999, "10.0.0.1")).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test]
async fn test_clicks_for_link_paginates_newest_first(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "pg1", "https://example.com").await;
    for i in 0..5 {
        common::create_test_click(&pool, link_id, &format!("10.0.0.{i}")).await;
    }
    let stats = PgStatsRepository::new(Arc::new(pool));

    let first = stats
        .clicks_for_link(link_id, ClickFilter::new(0, 2))
        .await
        .unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].ip.as_deref(), Some("10.0.0.4"));

    let last = stats
        .clicks_for_link(link_id, ClickFilter::new(4, 2))
        .await
        .unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].ip.as_deref(), Some("10.0.0.0"));

    assert_eq!(stats.count_clicks(link_id, None, None).await.unwrap(), 5);
}

#[sqlx::test]
async fn test_date_range_filter(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "dr1", "https://example.com").await;
    common::create_test_click(&pool, link_id, "10.0.0.1").await;
    let stats = PgStatsRepository::new(Arc::new(pool));

    let future = Utc::now() + Duration::hours(1);
    let past = Utc::now() - Duration::hours(1);

    let none = stats
        .clicks_for_link(
            link_id,
            ClickFilter::new(0, 10).with_date_range(Some(future), None),
        )
        .await
        .unwrap();
    assert!(none.is_empty());
    assert_eq!(stats.count_clicks(link_id, Some(future), None).await.unwrap(), 0);

    let all = stats
        .clicks_for_link(
            link_id,
            ClickFilter::new(0, 10).with_date_range(Some(past), Some(future)),
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test]
async fn test_click_worker_persists_events(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "wrk1", "https://example.com").await;
    let pool = Arc::new(pool);
    let stats = Arc::new(PgStatsRepository::new(Arc::clone(&pool)));

    let (tx, rx) = mpsc::channel(16);
    let worker = tokio::spawn(run_click_worker(rx, stats, 2));

    for _ in 0..3 {
        tx.send(ClickEvent::new(
            link_id,
            "wrk1".to_string(),
            Some("10.0.0.1".to_string()),
            Some("agent"),
            None,
        ))
        .await
        .unwrap();
    }
    drop(tx);
    worker.await.unwrap();

    let links = PgLinkRepository::new(pool);
    let link = links.find_by_code("wrk1").await.unwrap().unwrap();
    assert_eq!(link.click_count, 3);
}
