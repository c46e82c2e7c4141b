//! Mock hardware for integration tests.
//!
//! A scripted pulse line, a hand-advanced clock, and sinks that record
//! every snapshot and trace run so tests can assert on the full history
//! without touching a GPIO chip or the filesystem.

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::mpsc;

use embedded_hal::digital::{ErrorType, InputPin};
use wellmeter::app::events::StatusSnapshot;
use wellmeter::app::ports::{Clock, StatusSink, TraceSink};
use wellmeter::diagnostics::TraceRecord;
use wellmeter::error::GpioError;

// ── ScriptedPin ───────────────────────────────────────────────

/// Replays a fixed level sequence, then fails like an unplugged line.
pub struct ScriptedPin {
    levels: VecDeque<bool>,
}

#[allow(dead_code)]
impl ScriptedPin {
    pub fn new(levels: impl IntoIterator<Item = bool>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    /// Build from runs of `(level, ticks)`.
    pub fn from_runs(runs: &[(bool, usize)]) -> Self {
        Self::new(runs.iter().flat_map(|&(level, n)| std::iter::repeat_n(level, n)))
    }

    pub fn remaining(&self) -> usize {
        self.levels.len()
    }
}

impl ErrorType for ScriptedPin {
    type Error = GpioError;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        self.levels.pop_front().ok_or(GpioError::ReadFailed(99))
    }

    fn is_low(&mut self) -> Result<bool, GpioError> {
        self.is_high().map(|h| !h)
    }
}

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    ms: Cell<u32>,
    wall: Cell<i64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new(ms: u32, wall: i64) -> Self {
        Self {
            ms: Cell::new(ms),
            wall: Cell::new(wall),
        }
    }

    pub fn set_ms(&self, ms: u32) {
        self.ms.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.ms.set(self.ms.get().wrapping_add(ms));
        self.wall.set(self.wall.get() + i64::from(ms / 1000));
    }
}

impl Clock for ManualClock {
    fn monotonic_ms(&self) -> u32 {
        self.ms.get()
    }

    fn wall_clock_secs(&self) -> i64 {
        self.wall.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub snapshots: Vec<StatusSnapshot>,
    pub traces: Vec<TraceRecord>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&StatusSnapshot> {
        self.snapshots.last()
    }
}

impl StatusSink for RecordingSink {
    fn publish(&mut self, snapshot: &StatusSnapshot, _now_secs: i64) {
        self.snapshots.push(*snapshot);
    }
}

impl TraceSink for RecordingSink {
    fn trace(&mut self, records: &[TraceRecord]) {
        self.traces.extend_from_slice(records);
    }
}

// ── ChannelTraceSink ──────────────────────────────────────────

/// Forwards each trace run to another thread.
pub struct ChannelTraceSink(pub mpsc::Sender<Vec<TraceRecord>>);

impl TraceSink for ChannelTraceSink {
    fn trace(&mut self, records: &[TraceRecord]) {
        let _ = self.0.send(records.to_vec());
    }
}
