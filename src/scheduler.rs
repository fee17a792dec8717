use std::time::{Duration, Instant};

/// Decides when the driver loop should call [`crate::game::GameState::tick`].
///
/// Time is always passed in, so implementations stay testable without a
/// real clock.
pub trait Scheduler {
    /// Arms the schedule with `interval`; the first tick fires one interval after `now`.
    fn start(&mut self, interval: Duration, now: Instant);

    /// Disarms the schedule. Subsequent polls never fire.
    fn stop(&mut self);

    /// Returns true while armed.
    fn is_running(&self) -> bool;

    /// Returns true at most once per elapsed interval.
    fn poll(&mut self, now: Instant) -> bool;
}

/// Fixed-period scheduler polled from the terminal event loop.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl IntervalScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the interval the schedule was last armed with.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.last_tick = Some(now);
    }

    fn stop(&mut self) {
        self.last_tick = None;
    }

    fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    fn poll(&mut self, now: Instant) -> bool {
        let Some(last_tick) = self.last_tick else {
            return false;
        };

        if now.saturating_duration_since(last_tick) < self.interval {
            return false;
        }

        // Late polls fire once and re-arm from now; missed ticks are not replayed.
        self.last_tick = Some(now);
        true
    }
}

/// Converts a speed setting into a tick period.
#[must_use]
pub fn tick_interval(speed_ms: u64) -> Duration {
    Duration::from_millis(speed_ms)
}
