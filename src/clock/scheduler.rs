use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

/// Identifies one scheduled wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(u64);

#[derive(Debug, Clone, Copy)]
struct PendingTick {
    id: TickId,
    deadline: Instant,
}

/// Holds at most one pending clock tick.
///
/// Scheduling cancels whatever was pending, and a tick only counts when it
/// fires with the id that is currently pending, so a stale wake-up can never
/// drive a redraw.
#[derive(Debug, Default)]
pub struct ClockScheduler {
    pending: Option<PendingTick>,
    next_id: u64,
}

impl ClockScheduler {
    /// Creates a scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the next tick `delay` from now.
    pub fn schedule(&mut self, delay: Duration) -> TickId {
        self.schedule_at(Instant::now() + delay)
    }

    /// Schedules the next tick at `deadline`.
    ///
    /// Callers cancel first; a tick still pending here is replaced and
    /// logged.
    pub fn schedule_at(&mut self, deadline: Instant) -> TickId {
        if let Some(stale) = self.pending.take() {
            warn!(tick = stale.id.0, "replacing tick that was never cancelled");
        }

        self.next_id += 1;
        let id = TickId(self.next_id);
        self.pending = Some(PendingTick { id, deadline });

        debug!(tick = id.0, "tick scheduled");
        id
    }

    /// Cancels the pending tick, if any.
    pub fn cancel(&mut self) -> Option<TickId> {
        let cancelled = self.pending.take().map(|tick| tick.id);
        if let Some(id) = cancelled {
            debug!(tick = id.0, "tick cancelled");
        }
        cancelled
    }

    /// Consumes the pending tick if `id` is the one pending.
    ///
    /// Returns `false` for ticks that were cancelled or replaced.
    pub fn fire(&mut self, id: TickId) -> bool {
        match self.pending {
            Some(tick) if tick.id == id => {
                self.pending = None;
                true
            }
            _ => {
                debug!(tick = id.0, "ignoring stale tick");
                false
            }
        }
    }

    /// Id of the pending tick.
    pub fn pending(&self) -> Option<TickId> {
        self.pending.map(|tick| tick.id)
    }

    /// When the pending tick is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|tick| tick.deadline)
    }
}

/// Delay from `millisecond` within the current second to the next second
/// boundary. Zero when already on a boundary.
pub fn aligned_start_delay(millisecond: u32) -> Duration {
    Duration::from_millis(u64::from((1000 - millisecond.min(999)) % 1000))
}

/// Delay until the next tick once running.
///
/// One second while the second hand is shown, otherwise up to the next
/// minute boundary.
pub fn steady_delay(show_seconds: bool, second: u32) -> Duration {
    if show_seconds {
        Duration::from_secs(1)
    } else {
        Duration::from_secs(u64::from(60 - second.min(59)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_seconds_wait_for_next_minute() {
        assert_eq!(steady_delay(false, 45), Duration::from_secs(15));
        assert_eq!(steady_delay(false, 0), Duration::from_secs(60));
        assert_eq!(steady_delay(false, 59), Duration::from_secs(1));
    }

    #[test]
    fn shown_seconds_tick_every_second() {
        for second in [0, 30, 59] {
            assert_eq!(steady_delay(true, second), Duration::from_secs(1));
        }
    }

    #[test]
    fn start_aligns_to_second_boundary() {
        assert_eq!(aligned_start_delay(250), Duration::from_millis(750));
        assert_eq!(aligned_start_delay(999), Duration::from_millis(1));
        assert_eq!(aligned_start_delay(0), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn only_pending_tick_fires() {
        let mut scheduler = ClockScheduler::new();

        let first = scheduler.schedule(Duration::from_secs(1));
        scheduler.cancel();
        let second = scheduler.schedule(Duration::from_secs(1));

        assert!(!scheduler.fire(first));
        assert!(scheduler.fire(second));
        assert!(!scheduler.fire(second));
        assert_eq!(scheduler.pending(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_pending_tick() {
        let mut scheduler = ClockScheduler::new();

        let first = scheduler.schedule(Duration::from_secs(60));
        let second = scheduler.schedule(Duration::from_secs(1));

        assert_ne!(first, second);
        assert_eq!(scheduler.pending(), Some(second));
    }
}
