//! Background persistence of click events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Retries after the first failed write.
pub const MAX_RETRIES: usize = 3;

/// Drains `rx` until every sender is dropped, writing at most `concurrency`
/// clicks at a time. In-flight writes finish before the worker returns.
pub async fn run_click_worker<S>(
    mut rx: mpsc::Receiver<ClickEvent>,
    stats_repository: Arc<S>,
    concurrency: usize,
) where
    S: StatsRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let repository = Arc::clone(&stats_repository);
        tokio::spawn(async move {
            let _permit = permit;
            process_event(repository.as_ref(), event).await;
        });
    }

    let _ = semaphore.acquire_many(concurrency as u32).await;
    tracing::info!("Click worker stopped");
}

/// Persists one event, retrying transient failures with exponential backoff.
///
/// Returns whether the click was stored. A link deleted since the redirect
/// fails validation and is dropped without retrying.
pub async fn process_event<S>(stats_repository: &S, event: ClickEvent) -> bool
where
    S: StatsRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);
    let new_click = event.to_new_click();

    let result = RetryIf::start(
        strategy,
        || stats_repository.record_click(new_click.clone()),
        |e: &AppError| matches!(e, AppError::Internal { .. }),
    )
    .await;

    match result {
        Ok(click) => {
            tracing::debug!(code = %event.code, click_id = click.id, "click recorded");
            true
        }
        Err(e) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            tracing::warn!(code = %event.code, link_id = event.link_id, error = %e, "failed to record click");
            false
        }
    }
}
