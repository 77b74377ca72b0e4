use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Error, Result};

/// A point in time by which an operation must have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        Deadline(Instant::now() + duration)
    }

    /// `now + duration`, capped by `parent` when the parent expires sooner.
    pub fn within(parent: Option<Deadline>, duration: Duration) -> Self {
        let own = Deadline::after(duration);
        match parent {
            Some(parent) => own.min(parent),
            None => own,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    /// Drives `fut` until it resolves or the deadline passes, whichever
    /// comes first. Expiry is reported as [`Error::TimedOut`].
    pub async fn run<T, F>(self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout_at(self.0, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::TimedOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn child_deadline_is_capped_by_parent() {
        let parent = Deadline::after(Duration::from_millis(100));
        let child = Deadline::within(Some(parent), Duration::from_secs(3));

        assert_eq!(child, parent);
        assert!(child.remaining() <= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn child_deadline_keeps_own_duration_when_shorter() {
        let parent = Deadline::after(Duration::from_secs(10));
        let child = Deadline::within(Some(parent), Duration::from_secs(1));

        assert!(child < parent);
        assert!(child.remaining() <= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn unbounded_parent_uses_own_duration() {
        let child = Deadline::within(None, Duration::from_millis(500));
        assert!(child.remaining() > Duration::from_millis(400));
    }

    #[tokio::test]
    async fn run_reports_expiry_as_timed_out() {
        let deadline = Deadline::after(Duration::from_millis(20));
        let result = deadline
            .run(async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(Error::TimedOut)));
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[tokio::test]
    async fn run_passes_through_inner_result() {
        let deadline = Deadline::after(Duration::from_secs(1));

        let ok = deadline.run(async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<()> = deadline.run(async { Err(Error::EmptyBody) }).await;
        assert!(matches!(err, Err(Error::EmptyBody)));
    }
}
