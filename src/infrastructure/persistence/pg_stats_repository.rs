//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{ClickFilter, StatsRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    user_agent: Option<String>,
    referer: Option<String>,
    ip: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            link_id: row.link_id,
            clicked_at: row.clicked_at,
            user_agent: row.user_agent,
            referer: row.referer,
            ip: row.ip,
        }
    }
}

/// PostgreSQL repository for click recording and access logs.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO link_clicks (link_id, user_agent, referer, ip)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, clicked_at, user_agent, referer, ip
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.user_agent)
        .bind(&new_click.referer)
        .bind(&new_click.ip)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE links
            SET click_count = click_count + 1, last_accessed_at = $2
            WHERE id = $1
            "#,
        )
        .bind(row.link_id)
        .bind(row.clicked_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn clicks_for_link(
        &self,
        link_id: i64,
        filter: ClickFilter,
    ) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, link_id, clicked_at, user_agent, referer, ip
            FROM link_clicks
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR clicked_at <= $3)
            ORDER BY clicked_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(link_id)
        .bind(filter.from_date)
        .bind(filter.to_date)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn count_clicks(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM link_clicks
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR clicked_at <= $3)
            "#,
        )
        .bind(link_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
