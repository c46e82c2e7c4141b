//! Sampler → reporter event hand-off.
//!
//! Events are produced by the sampling thread (one per confirmed pulse)
//! and consumed by the reporting loop, which processes them one at a time
//! in arrival order.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌───────────────┐
//! │ Sampler      │────▶│ EventChannel  │────▶│ Reporting     │
//! │ (SCHED_FIFO) │     │ (bounded FIFO)│     │ loop (main)   │
//! └──────────────┘     └───────────────┘     └───────────────┘
//! ```
//!
//! The producer never waits: [`EventChannel::send`] is a non-blocking
//! `try_send`, and a full channel drops the record and bumps a counter the
//! consumer can report.  Records move as whole values, so a torn record
//! can never be observed.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Maximum number of pending events.
///
/// Presses are at least 35 ms apart, so a single slot would already
/// suffice; the extra depth covers a reporter stalled on file I/O.
pub const EVENT_CHANNEL_DEPTH: usize = 8;

/// One confirmed pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseEvent {
    /// Unix time (seconds) at which the press was confirmed.
    pub wall_clock_secs: i64,
    /// Sampler monotonic clock (milliseconds, wrapping) at confirmation.
    pub monotonic_ms: u32,
}

/// Bounded single-producer / single-consumer event channel.
pub struct EventChannel {
    channel: Channel<CriticalSectionRawMutex, PulseEvent, EVENT_CHANNEL_DEPTH>,
    dropped: AtomicU32,
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EventChannel {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueue an event without blocking.
    /// Returns `false` if the channel is full (event dropped).
    pub fn send(&self, event: PulseEvent) -> bool {
        if self.channel.try_send(event).is_ok() {
            true
        } else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Block the calling thread until the next event arrives.
    pub fn receive(&self) -> PulseEvent {
        futures_lite::future::block_on(self.channel.receive())
    }

    /// Pop the next event if one is pending.
    pub fn try_receive(&self) -> Option<PulseEvent> {
        self.channel.try_receive().ok()
    }

    /// Number of events dropped since the last call, resetting the count.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
