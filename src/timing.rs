//! Miscellaneous helper types around controlling the timing of events.

use std::time::Duration;

#[cfg(test)]
pub use mock_instant::Instant;
#[cfg(not(test))]
pub use std::time::Instant;

/// How long until `then`, or zero if it's already passed.
pub fn until(then: Instant, now: Instant) -> Duration {
    if then > now {
        then.duration_since(now)
    } else {
        Duration::ZERO
    }
}

/// Keeps track of time between relatively steady pulses.
///
/// Ticks try to stay lined up with the original tick, but if [`Self::tick`] is called more than half a period
/// late, the next tick will be reset relative to the current time instead.
pub struct Timer {
    next: Instant,
    period: Duration,
}

impl Timer {
    /// Create a new timer with the given period. The first tick is right now.
    pub fn new(period: Duration) -> Self {
        Self {
            next: Instant::now(),
            period,
        }
    }

    /// How much time is left before the timer ticks over.
    pub fn remaining(&self) -> Duration {
        until(self.next, Instant::now())
    }

    /// Move on to the next tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next + self.period / 2 {
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }

    /// Check whether we've ticked yet; if so, reset the timer. Useful for ratelimiting.
    pub fn ready(&mut self) -> bool {
        if Instant::now() >= self.next {
            self.tick();
            true
        } else {
            false
        }
    }
}
