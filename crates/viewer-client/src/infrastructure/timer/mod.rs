//! [`TimerScheduler`] implementations.
//!
//! - [`interval::IntervalScheduler`] spawns a tokio task per timer.
//! - [`manual::ManualScheduler`] never fires on its own; tests call
//!   [`manual::ManualScheduler::fire_all`] to simulate a tick.
//!
//! [`TimerScheduler`]: crate::application::timer::TimerScheduler

pub mod interval;
pub mod manual;
