//! Outbound status data.
//!
//! The [`RateTracker`](super::tracker::RateTracker) produces a
//! [`StatusSnapshot`] after every update.  Sinks on the other side of the
//! [`StatusSink`](super::ports::StatusSink) port turn it into a
//! [`StatusRecord`] for the status file and console.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Read-only copy of the meter counters after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    /// Cumulative pulse count, including the seeded starting total.
    pub total_events: u64,
    /// Wall clock (unix seconds) of the last event, or of the baseline.
    pub last_event_wall_clock: Option<i64>,
    /// Monotonic milliseconds of the last event, or of the baseline.
    pub last_event_monotonic_ms: u32,
    /// Pulses per minute; `None` until two readings exist or on zero delta.
    pub rate_per_minute: Option<f32>,
}

/// Serialised status line, e.g.
/// `{"time":1760882531,"ctime":"Sun Oct 19 14:02:11 2025","millis":5012,"total":1043,"gpm":1714.3}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub time: i64,
    pub ctime: String,
    pub millis: u32,
    pub total: u64,
    pub gpm: f32,
}

impl StatusRecord {
    /// Build a record from a snapshot.  `now_secs` stands in for the event
    /// time when the snapshot carries none.
    pub fn from_snapshot(snapshot: &StatusSnapshot, now_secs: i64) -> Self {
        let time = snapshot.last_event_wall_clock.unwrap_or(now_secs);
        Self {
            time,
            ctime: ctime(time),
            millis: snapshot.last_event_monotonic_ms,
            total: snapshot.total_events,
            gpm: snapshot.rate_per_minute.map_or(0.0, round_one_decimal),
        }
    }

    /// Single-line JSON form.
    pub fn to_json(&self) -> String {
        // Plain struct of scalars and a string; serialisation cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Round to one decimal place for display.
pub fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Local time in `ctime(3)` layout without the trailing newline.
pub fn ctime(unix_secs: i64) -> String {
    match Local.timestamp_opt(unix_secs, 0).single() {
        Some(t) => t.format("%a %b %e %H:%M:%S %Y").to_string(),
        None => String::from("?"),
    }
}
