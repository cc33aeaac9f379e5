//! Fan-out/fan-in execution of independent upstream tasks.
//!
//! Every orchestrator funnels its concurrent calls through this module
//! instead of hand-rolling channel pairs per endpoint. Each task is spawned
//! on the runtime and delivers exactly one value-or-error over its own
//! oneshot channel; the collector observes completions in arrival order.
//!
//! There is no cancellation: when a collection policy returns early, the
//! outstanding tasks run to completion in the background and their results
//! are discarded.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::oneshot;
use tracing::warn;

use crate::error::ApiError;
use crate::metrics;

/// A unit of work for the executor: a no-argument future producing a
/// value or an error.
pub type Task<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// Box a future into a [`Task`].
pub fn task<T, F>(fut: F) -> Task<T>
where
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    Box::pin(fut)
}

/// Spawn every task and return the fan-in receivers tagged with the task's
/// position in the input vector.
///
/// The wrapper around each task guarantees the channel receives exactly one
/// value; a dropped sender (the task panicked) is surfaced by the collector
/// as [`ApiError::TaskAborted`].
fn spawn_all<T>(
    tasks: Vec<Task<T>>,
) -> FuturesUnordered<
    impl Future<Output = (usize, Result<Result<T, ApiError>, oneshot::error::RecvError>)>,
>
where
    T: Send + 'static,
{
    let receivers = FuturesUnordered::new();
    for (index, fut) in tasks.into_iter().enumerate() {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            // The receiver may be gone if the collector already returned
            // early; the result is discarded in that case.
            let _ = tx.send(fut.await);
        });
        receivers.push(async move { (index, rx.await) });
    }
    receivers
}

/// Run all tasks concurrently and wait for every one of them.
///
/// On success the values come back in task order, one per task. The first
/// failure observed by the collector wins and is returned immediately;
/// sibling tasks keep running detached. Zero tasks is an empty success.
pub async fn all_or_fail<T>(tasks: Vec<Task<T>>) -> Result<Vec<T>, ApiError>
where
    T: Send + 'static,
{
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let total = tasks.len();
    let mut receivers = spawn_all(tasks);
    let mut slots: Vec<Option<T>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);

    while let Some((index, received)) = receivers.next().await {
        match received {
            Ok(Ok(value)) => slots[index] = Some(value),
            Ok(Err(err)) => {
                warn!(task = index, error = %err, "fan-out task failed");
                metrics::FANOUT_BATCHES
                    .with_label_values(&["all_or_fail", "error"])
                    .inc();
                return Err(err);
            }
            Err(_) => {
                metrics::FANOUT_BATCHES
                    .with_label_values(&["all_or_fail", "aborted"])
                    .inc();
                return Err(ApiError::TaskAborted);
            }
        }
    }

    metrics::FANOUT_BATCHES
        .with_label_values(&["all_or_fail", "success"])
        .inc();

    // Every receiver completed with a value, so every slot is filled.
    slots
        .into_iter()
        .collect::<Option<Vec<T>>>()
        .ok_or(ApiError::TaskAborted)
}

/// Run all tasks concurrently and wait for every one of them, keeping
/// per-task outcomes.
///
/// Unlike [`all_or_fail`] a failure does not end the batch: the caller
/// gets one `Result` per task, in task order. A panicked task yields
/// [`ApiError::TaskAborted`] in its slot.
pub async fn best_effort<T>(tasks: Vec<Task<T>>) -> Vec<Result<T, ApiError>>
where
    T: Send + 'static,
{
    let total = tasks.len();
    let mut receivers = spawn_all(tasks);
    let mut slots: Vec<Result<T, ApiError>> = Vec::with_capacity(total);
    slots.resize_with(total, || Err(ApiError::TaskAborted));

    while let Some((index, received)) = receivers.next().await {
        match received {
            Ok(outcome) => slots[index] = outcome,
            Err(_) => slots[index] = Err(ApiError::TaskAborted),
        }
    }

    metrics::FANOUT_BATCHES
        .with_label_values(&["best_effort", "success"])
        .inc();
    slots
}

/// Run all tasks concurrently and return the first success observed.
///
/// Losing tasks run to completion in the background and their results are
/// discarded. If every task fails, the first failure observed is returned.
///
/// Zero tasks is `InvalidInput`, not an empty success: unlike
/// [`all_or_fail`] this policy must produce a single value, and a race
/// nobody entered has no winner.
pub async fn race_first_success<T>(tasks: Vec<Task<T>>) -> Result<T, ApiError>
where
    T: Send + 'static,
{
    if tasks.is_empty() {
        return Err(ApiError::InvalidInput(
            "cannot race an empty set of tasks".to_string(),
        ));
    }

    let mut receivers = spawn_all(tasks);
    let mut first_error: Option<ApiError> = None;

    while let Some((index, received)) = receivers.next().await {
        match received {
            Ok(Ok(value)) => {
                metrics::FANOUT_BATCHES
                    .with_label_values(&["race_first_success", "success"])
                    .inc();
                return Ok(value);
            }
            Ok(Err(err)) => {
                warn!(task = index, error = %err, "fan-out task failed");
                first_error.get_or_insert(err);
            }
            Err(_) => {
                first_error.get_or_insert(ApiError::TaskAborted);
            }
        }
    }

    metrics::FANOUT_BATCHES
        .with_label_values(&["race_first_success", "error"])
        .inc();
    Err(first_error.unwrap_or(ApiError::TaskAborted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_all_or_fail_empty_is_success() {
        let results: Vec<u32> = all_or_fail(Vec::new()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_all_or_fail_single_task_behaves_synchronously() {
        let results = all_or_fail(vec![task(async { Ok(7) })]).await.unwrap();
        assert_eq!(results, vec![7]);
    }

    #[tokio::test]
    async fn test_all_or_fail_preserves_task_order() {
        // The slower task is first; the output must still be in task order.
        let tasks = vec![
            task(async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok("slow")
            }),
            task(async { Ok("fast") }),
        ];
        let results = all_or_fail(tasks).await.unwrap();
        assert_eq!(results, vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_all_or_fail_returns_first_observed_error() {
        let tasks: Vec<Task<u32>> = vec![
            task(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Err(ApiError::Unreachable("late".into()))
            }),
            task(async { Err(ApiError::NotFound("early".into())) }),
        ];
        let err = all_or_fail(tasks).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_all_or_fail_does_not_wait_for_slow_sibling_on_error() {
        let start = std::time::Instant::now();
        let tasks: Vec<Task<u32>> = vec![
            task(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(1)
            }),
            task(async {
                Err(ApiError::Upstream {
                    status: 500,
                    message: "boom".into(),
                })
            }),
        ];
        let err = all_or_fail(tasks).await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream { status: 500, .. }));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_all_or_fail_survives_task_panic() {
        let tasks: Vec<Task<u32>> = vec![
            task(async { Ok(1) }),
            task(async { panic!("task blew up") }),
        ];
        let err = all_or_fail(tasks).await.unwrap_err();
        assert!(matches!(err, ApiError::TaskAborted));
    }

    #[tokio::test]
    async fn test_best_effort_keeps_per_task_outcomes() {
        let tasks: Vec<Task<u32>> = vec![
            task(async { Ok(1) }),
            task(async { Err(ApiError::Unreachable("down".into())) }),
            task(async { Ok(3) }),
        ];
        let outcomes = best_effort(tasks).await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(*outcomes[0].as_ref().unwrap(), 1);
        assert!(matches!(outcomes[1], Err(ApiError::Unreachable(_))));
        assert_eq!(*outcomes[2].as_ref().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_best_effort_empty_is_empty() {
        let outcomes: Vec<Result<u32, ApiError>> = best_effort(Vec::new()).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_race_returns_first_success() {
        let tasks = vec![
            task(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok("slow")
            }),
            task(async { Ok("fast") }),
        ];
        let winner = race_first_success(tasks).await.unwrap();
        assert_eq!(winner, "fast");
    }

    #[tokio::test]
    async fn test_race_skips_failures_and_waits_for_a_success() {
        let tasks = vec![
            task(async { Err(ApiError::Unreachable("down".into())) }),
            task(async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(42)
            }),
        ];
        assert_eq!(race_first_success(tasks).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_race_all_failed_returns_first_observed_error() {
        let tasks: Vec<Task<u32>> = vec![
            task(async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Err(ApiError::Decode("late".into()))
            }),
            task(async { Err(ApiError::Unreachable("early".into())) }),
        ];
        let err = race_first_success(tasks).await.unwrap_err();
        assert!(matches!(err, ApiError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_race_empty_is_rejected() {
        let err = race_first_success::<u32>(Vec::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_losers_run_to_completion_in_background() {
        let completed = Arc::new(AtomicUsize::new(0));
        let loser_flag = Arc::clone(&completed);
        let tasks = vec![
            task(async { Ok(()) }),
            task(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                loser_flag.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ];
        race_first_success(tasks).await.unwrap();
        // The loser was not cancelled by the early return.
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }
}
