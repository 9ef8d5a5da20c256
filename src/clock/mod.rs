//! Wall-clock time, hand angles and the repaint tick scheduler.

mod angles;
mod scheduler;
mod time;

pub use angles::{HandAngles, RAD_PER_DEGREE};
pub use scheduler::{ClockScheduler, TickId, aligned_start_delay, steady_delay};
pub use time::{ClockZone, DisplayTime, SystemClock, TimeSource};
