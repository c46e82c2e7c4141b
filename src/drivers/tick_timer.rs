//! Periodic tick pacing for the sampling thread.
//!
//! Deadlines are absolute (`next += period`), so sleep overshoot on one
//! tick is absorbed by a shorter sleep on the next instead of drifting.
//! When the thread falls more than a full period behind (preempted, no
//! real-time priority) the schedule re-synchronises to "now" rather than
//! replaying the missed ticks in a burst.

use std::time::{Duration, Instant};

pub struct TickTimer {
    period: Duration,
    next: Instant,
    overruns: u64,
}

impl TickTimer {
    /// Start a timer whose first deadline is one `period` from now.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
            overruns: 0,
        }
    }

    /// Sleep until the next deadline and advance it by one period.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else if now - self.next > self.period {
            self.overruns += 1;
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
    }

    /// Times the schedule had to be re-synchronised.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
