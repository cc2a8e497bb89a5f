//! Tick scheduling for the convergence engine.
//!
//! Portable pacing without async/await or platform timers: the controller
//! polls the scheduler with the current time, and the caller is responsible
//! for sleeping until the returned deadline. The scheduler is armed only
//! while fade work is outstanding, so an idle controller costs nothing.

use embassy_time::{Duration, Instant};

/// Default convergence tick rate (75 Hz).
pub const DEFAULT_TICK_HZ: u32 = 75;

/// Default tick duration based on the target rate.
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_TICK_HZ as u64);

/// Armed/disarmed periodic tick source.
///
/// `arm` is a request, not a guarantee: the tick actually runs when the
/// owner next calls [`TickScheduler::poll`] with a due timestamp. Arming an
/// already-armed scheduler is harmless.
#[derive(Debug)]
pub struct TickScheduler {
    armed: bool,
    next_tick: Instant,
    tick_duration: Duration,
}

impl TickScheduler {
    /// Create a disarmed scheduler at the default 75 Hz rate.
    pub const fn new() -> Self {
        Self::with_tick_duration(DEFAULT_TICK_DURATION)
    }

    /// Create a disarmed scheduler with a custom tick duration.
    pub const fn with_tick_duration(tick_duration: Duration) -> Self {
        Self {
            armed: false,
            next_tick: Instant::from_millis(0),
            tick_duration,
        }
    }

    /// Arm the scheduler with the first tick immediately due.
    ///
    /// Idempotent: re-arming while armed keeps the current deadline.
    pub fn arm(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.next_tick = Instant::from_millis(0);
    }

    /// Stop the periodic ticks.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Whether ticks are currently scheduled.
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Check whether a tick is due and advance the deadline if so.
    ///
    /// If we have fallen behind by more than two ticks, the backlog is
    /// skipped instead of replayed as a catch-up burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.armed || now < self.next_tick {
            return false;
        }

        let drift_limit = self.next_tick + self.tick_duration + self.tick_duration;
        if now > drift_limit {
            self.next_tick = now;
        }
        self.next_tick += self.tick_duration;

        true
    }

    /// Deadline of the next tick, or `None` while disarmed.
    ///
    /// A disarmed scheduler has nothing pending; the caller may sleep until
    /// the next external event.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.then_some(self.next_tick)
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}
