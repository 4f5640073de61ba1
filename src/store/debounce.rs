//! Debounce helper for typed search input
//!
//! Re-arming supersedes any pending trigger, so only the most recent call
//! within the quiet window ever fires. Categorical filter changes bypass
//! this entirely and recompute immediately.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Coalesces a burst of triggers into a single firing after a quiet window
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn from_millis(window_ms: u64) -> Self {
        Self::new(Duration::from_millis(window_ms))
    }

    /// Arm (or re-arm) the quiet window from now
    pub fn trigger(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Drop any pending trigger without firing
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once the quiet window has elapsed; clears the pending trigger.
    /// Poll-style counterpart of [`Debounce::settled`].
    pub fn ready(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Wait out the quiet window. Returns false immediately when nothing is
    /// pending, true once the pending trigger fires.
    pub async fn settled(&mut self) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        sleep_until(deadline).await;
        self.deadline = None;
        true
    }
}
