//! A scheduler whose timers only fire when told to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::timer::{TimerHandle, TimerScheduler, TimerTask};

struct ManualTimer {
    period: Duration,
    task: Mutex<TimerTask>,
    active: AtomicBool,
}

/// Records scheduled timers; [`fire_all`](Self::fire_all) runs one tick of
/// every timer that has not been cancelled.
#[derive(Default)]
pub struct ManualScheduler {
    timers: Mutex<Vec<Arc<ManualTimer>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one tick of every active timer and returns how many ran.
    pub fn fire_all(&self) -> usize {
        // Release the list before running tasks; a task may schedule timers.
        let active: Vec<Arc<ManualTimer>> = self
            .timers
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|t| t.active.load(Ordering::SeqCst))
            .cloned()
            .collect();

        let mut fired = 0;
        for timer in active {
            if timer.active.load(Ordering::SeqCst) {
                let mut task = timer.task.lock().expect("lock poisoned");
                (*task)();
                fired += 1;
            }
        }
        fired
    }

    /// Number of timers scheduled and not yet cancelled.
    pub fn active_count(&self) -> usize {
        self.timers
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|t| t.active.load(Ordering::SeqCst))
            .count()
    }

    /// Number of timers ever scheduled.
    pub fn scheduled_count(&self) -> usize {
        self.timers.lock().expect("lock poisoned").len()
    }

    /// Periods of every timer ever scheduled, in order.
    pub fn periods(&self) -> Vec<Duration> {
        self.timers
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|t| t.period)
            .collect()
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule_repeating(&self, period: Duration, task: TimerTask) -> TimerHandle {
        let timer = Arc::new(ManualTimer {
            period,
            task: Mutex::new(task),
            active: AtomicBool::new(true),
        });
        self.timers
            .lock()
            .expect("lock poisoned")
            .push(Arc::clone(&timer));

        TimerHandle::new(move || timer.active.store(false, Ordering::SeqCst))
    }
}
