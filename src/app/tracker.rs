//! Pulse total and rate bookkeeping.
//!
//! [`RateTracker`] owns the [`MeterCounters`] and is driven only by the
//! reporting loop.  Intervals are measured on the sampler's wrapping
//! millisecond clock; wall-clock time is carried for display only.

use super::events::StatusSnapshot;
use crate::events::PulseEvent;

const MS_PER_MINUTE: f32 = 60_000.0;

/// Counters mutated by the reporting loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeterCounters {
    pub total_events: u64,
    /// `None` until a baseline or first event is recorded.
    pub previous_wall_clock: Option<i64>,
    pub previous_monotonic_ms: u32,
    pub rate_per_minute: Option<f32>,
}

/// Elapsed milliseconds from `earlier` to `now` across `u32` wrap.
pub fn elapsed_ms(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}

/// Pulses per minute for one pulse every `delta_ms`; `None` on zero delta.
pub fn rate_per_minute(delta_ms: u32) -> Option<f32> {
    if delta_ms == 0 {
        None
    } else {
        Some(MS_PER_MINUTE / delta_ms as f32)
    }
}

#[derive(Debug, Clone)]
pub struct RateTracker {
    counters: MeterCounters,
}

impl RateTracker {
    /// Create a tracker whose total starts at `start_total`.
    pub fn new(start_total: u64) -> Self {
        Self {
            counters: MeterCounters {
                total_events: start_total,
                ..MeterCounters::default()
            },
        }
    }

    /// Record the startup reference point without counting a pulse.
    /// The reported rate is unknown until the next event.
    pub fn establish_baseline(&mut self, wall_clock_secs: i64, monotonic_ms: u32) -> StatusSnapshot {
        self.counters.previous_wall_clock = Some(wall_clock_secs);
        self.counters.previous_monotonic_ms = monotonic_ms;
        self.counters.rate_per_minute = None;
        self.snapshot()
    }

    /// Count one confirmed pulse and update the rate.
    pub fn record(&mut self, event: &PulseEvent) -> StatusSnapshot {
        let c = &mut self.counters;
        c.total_events = c.total_events.saturating_add(1);

        c.rate_per_minute = if c.previous_wall_clock.is_some() {
            rate_per_minute(elapsed_ms(event.monotonic_ms, c.previous_monotonic_ms))
        } else {
            None
        };

        c.previous_monotonic_ms = event.monotonic_ms;
        c.previous_wall_clock = Some(event.wall_clock_secs);
        self.snapshot()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            total_events: self.counters.total_events,
            last_event_wall_clock: self.counters.previous_wall_clock,
            last_event_monotonic_ms: self.counters.previous_monotonic_ms,
            rate_per_minute: self.counters.rate_per_minute,
        }
    }

    pub fn counters(&self) -> &MeterCounters {
        &self.counters
    }

    pub fn total(&self) -> u64 {
        self.counters.total_events
    }
}
