//! Host clock adapter.
//!
//! - Monotonic milliseconds come from `std::time::Instant`, truncated to
//!   `u32` so they wrap every ~49.7 days like a hardware tick counter.
//! - Wall clock comes from `chrono::Utc`.
//!
//! The adapter is `Copy`: the sampler and the reporting loop each hold a
//! copy sharing one origin, so their millisecond readings are comparable.

use std::time::Instant;

use crate::app::ports::Clock;

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn monotonic_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    fn wall_clock_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}
