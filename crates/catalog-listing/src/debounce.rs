//! Single-deadline debounce timer.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Holds at most one pending deadline.
///
/// Scheduling again replaces the deadline, so only the latest edit's quiet
/// period counts.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// (Re)start the quiet period from now.
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.quiet);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolve at `deadline`, or never when there is none.
    ///
    /// Takes the deadline by value so the caller's debouncer stays free to
    /// be rescheduled while this future is pending.
    pub async fn wait(deadline: Option<Instant>) {
        match deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}
