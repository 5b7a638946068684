//! tokio-backed repeating timers.
//!
//! # How the timer loop works (for beginners)
//!
//! `tokio::time::interval` yields once per period.  Its first `tick()`
//! resolves immediately, so the loop consumes that tick before running any
//! work; the task then first runs one full period after scheduling.
//!
//! Cancelling aborts the spawned task.  On a current-thread runtime the abort
//! takes effect before the task is polled again, so no tick runs after
//! [`TimerHandle::cancel`] returns.

use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::time::{interval, MissedTickBehavior};

use crate::application::timer::{TimerHandle, TimerScheduler, TimerTask};

/// Schedules timers as tasks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    runtime: Handle,
}

impl IntervalScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Uses the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Fails when called outside a tokio runtime.
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl TimerScheduler for IntervalScheduler {
    fn schedule_repeating(&self, period: Duration, mut task: TimerTask) -> TimerHandle {
        let join = self.runtime.spawn(async move {
            let mut ticker = interval(period);
            // A stalled runtime must not cause a burst of catch-up captures.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // Skip the immediate first tick.

            loop {
                ticker.tick().await;
                task();
            }
        });
        tracing::debug!(?period, "repeating timer scheduled");

        TimerHandle::new(move || {
            join.abort();
            tracing::debug!("repeating timer cancelled");
        })
    }
}
