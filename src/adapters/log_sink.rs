//! Log-based status sink adapter.
//!
//! Implements [`StatusSink`] (and [`TraceSink`] at debug level) by
//! writing to the `log` facade.  Used when no status file is configured, and alongside the
//! JSON sink for operators tailing the service log.

use log::{debug, info};

use crate::app::events::{StatusSnapshot, round_one_decimal};
use crate::app::ports::{StatusSink, TraceSink};
use crate::diagnostics::{TraceRecord, format_trace};

/// Adapter that logs every [`StatusSnapshot`].
#[derive(Debug, Default)]
pub struct LogStatusSink {
    published: u64,
}

impl LogStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots published so far.
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl StatusSink for LogStatusSink {
    fn publish(&mut self, s: &StatusSnapshot, _now_secs: i64) {
        self.published += 1;
        match s.rate_per_minute {
            Some(rate) => info!(
                "STATUS | total={} | rate={:.1}/min | at={}ms",
                s.total_events,
                round_one_decimal(rate),
                s.last_event_monotonic_ms,
            ),
            None => info!(
                "STATUS | total={} | rate=unknown | at={}ms",
                s.total_events, s.last_event_monotonic_ms,
            ),
        }
    }
}

impl TraceSink for LogStatusSink {
    fn trace(&mut self, records: &[TraceRecord]) {
        debug!("TRACE | {}", format_trace(records));
    }
}

/// Fans one snapshot or trace run out to two sinks.
pub struct TeeSink<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: StatusSink, B: StatusSink> StatusSink for TeeSink<A, B> {
    fn publish(&mut self, snapshot: &StatusSnapshot, now_secs: i64) {
        self.first.publish(snapshot, now_secs);
        self.second.publish(snapshot, now_secs);
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for TeeSink<A, B> {
    fn trace(&mut self, records: &[TraceRecord]) {
        self.first.trace(records);
        self.second.trace(records);
    }
}
