//! Timeout enforcement.
//!
//! # Responsibilities
//! - Carry one per-request deadline to every backend call
//! - Cancel the call cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other backend errors

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::backend::BackendError;

/// Point in time by which a backend call must complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    /// Time left before the deadline; zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// The full budget this deadline was created with.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn instant(&self) -> Instant {
        self.at
    }
}

/// Run a backend call, failing with [`BackendError::DeadlineExceeded`] once
/// `deadline` passes. The call future is dropped on expiry.
pub async fn with_deadline<T, F>(deadline: Deadline, call: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>>,
{
    match tokio::time::timeout_at(deadline.instant(), call).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::DeadlineExceeded(deadline.budget())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call_within_deadline_passes_through() {
        let deadline = Deadline::after(Duration::from_secs(1));
        let result = with_deadline(deadline, async { Ok::<_, BackendError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_hung_call_is_cut_off() {
        let deadline = Deadline::after(Duration::from_millis(20));
        let result: Result<(), _> = with_deadline(deadline, std::future::pending()).await;
        assert!(matches!(result, Err(BackendError::DeadlineExceeded(d)) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_remaining_shrinks_to_zero() {
        let deadline = Deadline::after(Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(deadline.remaining(), Duration::ZERO);
        assert_eq!(deadline.budget(), Duration::from_millis(5));
    }
}
