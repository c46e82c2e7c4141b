//! Reporting loop: the consumer side of the event channel.
//!
//! [`MeterService`] owns the [`RateTracker`] and publishes a snapshot
//! through a [`StatusSink`] after every update.  It is the only code that
//! touches the counters, and it runs entirely on the reporting thread.
//!
//! ```text
//!  EventChannel ──▶ ┌───────────────────┐ ──▶ StatusSink
//!                   │   MeterService    │
//!                   │   RateTracker     │
//!                   └───────────────────┘
//! ```

use log::{info, warn};

use crate::events::{EventChannel, PulseEvent};

use super::events::StatusSnapshot;
use super::ports::{Clock, StatusSink};
use super::tracker::RateTracker;

pub struct MeterService<C: Clock> {
    tracker: RateTracker,
    clock: C,
    started: bool,
}

impl<C: Clock> MeterService<C> {
    pub fn new(start_total: u64, clock: C) -> Self {
        Self {
            tracker: RateTracker::new(start_total),
            clock,
            started: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force the initial status push: records the rate baseline and
    /// publishes the seeded total.
    pub fn start(&mut self, sink: &mut impl StatusSink) -> StatusSnapshot {
        let now = self.clock.wall_clock_secs();
        let snapshot = self
            .tracker
            .establish_baseline(now, self.clock.monotonic_ms());
        self.started = true;
        sink.publish(&snapshot, now);
        info!("MeterService started, total={}", snapshot.total_events);
        snapshot
    }

    // ── Per-event processing ──────────────────────────────────

    /// Count one event and publish the resulting snapshot.
    pub fn handle_event(&mut self, event: &PulseEvent, sink: &mut impl StatusSink) -> StatusSnapshot {
        let snapshot = self.tracker.record(event);
        sink.publish(&snapshot, self.clock.wall_clock_secs());
        snapshot
    }

    /// Handle every event already queued, without blocking.
    /// Returns the number handled.
    pub fn poll(&mut self, channel: &EventChannel, sink: &mut impl StatusSink) -> usize {
        let mut handled = 0;
        while let Some(event) = channel.try_receive() {
            self.handle_event(&event, sink);
            handled += 1;
        }
        handled
    }

    /// Block on the channel forever, handling events as they arrive.
    ///
    /// The blocking receive is the only suspension point of the
    /// reporting thread.
    pub fn run(mut self, channel: &EventChannel, sink: &mut impl StatusSink) -> ! {
        if !self.started {
            self.start(sink);
        }
        info!("Reporting loop running");

        loop {
            let event = channel.receive();

            let dropped = channel.take_dropped();
            if dropped > 0 {
                warn!("event channel full, {} pulse(s) dropped", dropped);
            }

            self.handle_event(&event, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn total(&self) -> u64 {
        self.tracker.total()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}
