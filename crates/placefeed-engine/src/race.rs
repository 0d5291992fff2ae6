//! Bounded wait on a secondary source.

use std::future::Future;
use std::time::Duration;

/// How a raced operation ended.
#[derive(Debug)]
pub enum RaceOutcome<T, E> {
    Completed(T),
    Failed(E),
    /// The deadline fired first. The operation was dropped and its result,
    /// if any, is never observed.
    Elapsed,
}

/// Run `operation` against a deadline of `budget`, whichever finishes first.
pub async fn race_deadline<T, E, F>(budget: Duration, operation: F) -> RaceOutcome<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    tokio::select! {
        biased;
        result = operation => match result {
            Ok(value) => RaceOutcome::Completed(value),
            Err(err) => RaceOutcome::Failed(err),
        },
        () = tokio::time::sleep(budget) => RaceOutcome::Elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fast_operation_completes() {
        let outcome = race_deadline(Duration::from_millis(100), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, ()>(7)
        })
        .await;
        assert!(matches!(outcome, RaceOutcome::Completed(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_elapses() {
        let outcome = race_deadline(Duration::from_millis(100), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok::<_, ()>(7)
        })
        .await;
        assert!(matches!(outcome, RaceOutcome::Elapsed));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_reported_not_elapsed() {
        let outcome: RaceOutcome<u8, &str> =
            race_deadline(Duration::from_millis(100), async { Err("down") }).await;
        assert!(matches!(outcome, RaceOutcome::Failed("down")));
    }
}
