//! Trigger debouncing.
//!
//! Converts a raw level-sensed input into one advance event per physical
//! press. Poll-based: the owner samples the line and feeds the sample in
//! with the current time, so the debouncer composes with the tick loop
//! instead of blocking it.

use embassy_time::{Duration, Instant};

/// Default settle window after the line was last seen pressed.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Recently pressed; waiting for a clean release.
    Holdoff { until: Instant },
    /// Released long enough; the next pressed sample fires.
    Armed,
}

/// One-event-per-press debouncer over a boolean trigger line.
///
/// While in holdoff, every pressed sample pushes the settle deadline out;
/// the line must read released for a full settle window before the
/// debouncer re-arms. Once armed, the first pressed sample fires exactly
/// one event and re-enters holdoff. A press that never comes never fires —
/// interactive control has no deadline.
#[derive(Debug)]
pub struct TriggerDebouncer {
    settle: Duration,
    state: State,
}

impl TriggerDebouncer {
    /// Create a debouncer with the default 200 ms settle window.
    pub const fn new() -> Self {
        Self::with_settle(DEFAULT_SETTLE)
    }

    /// Create a debouncer with a custom settle window.
    ///
    /// Starts in holdoff with an already-expired deadline: a line held
    /// pressed at boot fires nothing until it has been released for a full
    /// settle window first.
    pub const fn with_settle(settle: Duration) -> Self {
        Self {
            settle,
            state: State::Holdoff {
                until: Instant::from_millis(0),
            },
        }
    }

    /// Feed one sample of the trigger line.
    ///
    /// Returns `true` exactly once per contiguous press.
    pub fn poll(&mut self, pressed: bool, now: Instant) -> bool {
        match self.state {
            State::Holdoff { until } => {
                if pressed {
                    // Still held (or bouncing back down): push the deadline out.
                    self.state = State::Holdoff {
                        until: now + self.settle,
                    };
                } else if now >= until {
                    self.state = State::Armed;
                }
                false
            }
            State::Armed => {
                if pressed {
                    self.state = State::Holdoff {
                        until: now + self.settle,
                    };
                    return true;
                }
                false
            }
        }
    }

    /// Whether the next pressed sample would fire an event.
    pub const fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed)
    }
}

impl Default for TriggerDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
