//! Debug sample trace and panic reporting.
//!
//! With `--debug`, the sampler records every level change of the pulse
//! line as a [`TraceRecord`] into a bounded SPSC queue.  A low-priority
//! [`TraceReporter`] thread drains the queue once per second and prints
//! the records as `[millis,level]` runs, which shows the bounce pattern
//! around each press even when no press is ever confirmed.  Records are
//! dropped (never waited on) when the queue is full, and the reporter
//! warns with the number lost.

use core::fmt::Write as _;
use core::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use heapless::spsc::{Consumer, Producer, Queue};
use log::warn;

use crate::app::ports::TraceSink;

/// Queue slots (one slot is reserved by the SPSC implementation).
pub const TRACE_QUEUE_SLOTS: usize = 128;

/// How often the reporter drains the queue.
pub const TRACE_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Trace records forwarded to the sink per batch.
const TRACE_BATCH: usize = 32;

/// One observed level change on the pulse line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Sampler monotonic clock at the change.
    pub millis: u32,
    /// New level (`true` = HIGH/idle).
    pub level: bool,
}

pub type TraceQueue = Queue<TraceRecord, TRACE_QUEUE_SLOTS>;

/// Trace queue plus the count of records lost to it being full.
pub struct TraceBuffer {
    queue: TraceQueue,
    dropped: AtomicU32,
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceBuffer {
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Split into the sampler and reporter halves.
    pub fn split(&mut self) -> (TraceRecorder<'_>, TraceReader<'_>) {
        let (producer, consumer) = self.queue.split();
        let dropped = &self.dropped;
        (
            TraceRecorder {
                producer,
                last_level: None,
                dropped,
            },
            TraceReader { consumer, dropped },
        )
    }
}

// ───────────────────────────────────────────────────────────────
// Producer half (sampler thread)
// ───────────────────────────────────────────────────────────────

pub struct TraceRecorder<'q> {
    producer: Producer<'q, TraceRecord, TRACE_QUEUE_SLOTS>,
    last_level: Option<bool>,
    dropped: &'q AtomicU32,
}

impl TraceRecorder<'_> {
    /// Record `level` if it differs from the previous sample.
    /// Lock-free and allocation-free; safe inside the sampler tick.
    pub fn observe(&mut self, millis: u32, level: bool) {
        if self.last_level == Some(level) {
            return;
        }
        self.last_level = Some(level);
        if self.producer.enqueue(TraceRecord { millis, level }).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Consumer half (trace reporter)
// ───────────────────────────────────────────────────────────────

pub struct TraceReader<'q> {
    consumer: Consumer<'q, TraceRecord, TRACE_QUEUE_SLOTS>,
    dropped: &'q AtomicU32,
}

impl TraceReader<'_> {
    /// Drain all pending records into a callback, oldest first.
    pub fn drain(&mut self, mut handler: impl FnMut(TraceRecord)) {
        while let Some(record) = self.consumer.dequeue() {
            handler(record);
        }
    }

    pub fn pending(&self) -> usize {
        self.consumer.len()
    }

    /// Records lost since the last call, resetting the count.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}

/// Drain pending trace records into the sink in fixed-size batches.
/// Returns the number forwarded.
pub fn forward_trace(reader: &mut TraceReader<'_>, sink: &mut impl TraceSink) -> usize {
    let mut batch: heapless::Vec<TraceRecord, TRACE_BATCH> = heapless::Vec::new();
    let mut forwarded = 0;
    reader.drain(|record| {
        if batch.is_full() {
            sink.trace(&batch);
            batch.clear();
        }
        let _ = batch.push(record);
        forwarded += 1;
    });
    if !batch.is_empty() {
        sink.trace(&batch);
    }
    forwarded
}

/// Periodic trace flusher, run on its own normal-priority thread so the
/// reporting loop keeps a single suspension point.
pub struct TraceReporter<'q> {
    reader: TraceReader<'q>,
    interval: Duration,
}

impl<'q> TraceReporter<'q> {
    pub fn new(reader: TraceReader<'q>, interval: Duration) -> Self {
        Self { reader, interval }
    }

    /// Forward everything pending and warn about records lost since the
    /// previous flush.  Returns the number forwarded.
    pub fn flush(&mut self, sink: &mut impl TraceSink) -> usize {
        let forwarded = forward_trace(&mut self.reader, sink);
        let dropped = self.reader.take_dropped();
        if dropped > 0 {
            warn!("trace: queue full, {} level change(s) dropped", dropped);
        }
        forwarded
    }

    /// Flush once per interval, forever.
    pub fn run(mut self, sink: &mut impl TraceSink) -> ! {
        loop {
            std::thread::sleep(self.interval);
            self.flush(sink);
        }
    }
}

/// Render records in the console trace layout, e.g. `[1200,0][1203,1]`.
pub fn format_trace(records: &[TraceRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 12);
    for r in records {
        let _ = write!(out, "[{},{}]", r.millis, u8::from(r.level));
    }
    out
}

// ───────────────────────────────────────────────────────────────
// Panic hook
// ───────────────────────────────────────────────────────────────

/// Install a panic hook that logs the reason and terminates the process.
///
/// A panicked sampler cannot be restarted in place, and the reporting loop
/// would otherwise block forever on an empty channel.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };
        let thread = std::thread::current();
        let name = thread.name().unwrap_or("unnamed");

        match info.location() {
            Some(loc) => log::error!("PANIC in '{}' at {}:{}: {}", name, loc.file(), loc.line(), reason),
            None => log::error!("PANIC in '{}': {}", name, reason),
        }
        std::process::exit(101);
    }));
}
