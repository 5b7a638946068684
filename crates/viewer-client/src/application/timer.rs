//! Cancellable repeating timers.
//!
//! The lifecycle coordinator schedules periodic work (thumbnail capture) and
//! must be able to stop it when the session leaves the connected state.  The
//! [`TimerHandle`] returned by a scheduler is that stop switch: cancelling it,
//! or simply dropping it, stops the timer.

use std::time::Duration;

/// Work run on every timer tick.
pub type TimerTask = Box<dyn FnMut() + Send + 'static>;

/// Schedules repeating work.
pub trait TimerScheduler: Send + Sync {
    /// Runs `task` every `period`, first after one full period has elapsed.
    fn schedule_repeating(&self, period: Duration, task: TimerTask) -> TimerHandle;
}

/// Owner of a scheduled timer.  Dropping the handle cancels the timer.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TimerHandle {
    /// Wraps the scheduler-specific cancellation action.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stops the timer.  No further ticks run after this returns.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
