//! Port traits: the boundary between the meter core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Sampler / MeterService (domain)
//! ```
//!
//! Driven adapters (clock, status and trace sinks) implement these traits.  The
//! sampler and [`MeterService`](super::service::MeterService) consume them
//! via generics, so the core never touches the OS directly and every path
//! is testable with mocks.  The pulse line itself is an
//! [`embedded_hal::digital::InputPin`].

use super::events::StatusSnapshot;
use crate::diagnostics::TraceRecord;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Time source for the sampler and reporting loop.
pub trait Clock {
    /// Milliseconds since an arbitrary origin.  Wraps at `u32::MAX`;
    /// callers must subtract with `wrapping_sub`.
    fn monotonic_ms(&self) -> u32;

    /// Current unix time in whole seconds.
    fn wall_clock_secs(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn monotonic_ms(&self) -> u32 {
        (**self).monotonic_ms()
    }

    fn wall_clock_secs(&self) -> i64 {
        (**self).wall_clock_secs()
    }
}

// ───────────────────────────────────────────────────────────────
// Status sink port (domain → status file / console / log)
// ───────────────────────────────────────────────────────────────

/// The reporting loop publishes every [`StatusSnapshot`] through this
/// port.  Adapters decide where it goes.
pub trait StatusSink {
    /// Publish a snapshot.  `now_secs` is the wall clock at publish time.
    /// Failures are the adapter's to log; they never reach the core.
    fn publish(&mut self, snapshot: &StatusSnapshot, now_secs: i64);
}

// ───────────────────────────────────────────────────────────────
// Trace sink port (debug trace reporter → console / log)
// ───────────────────────────────────────────────────────────────

/// Destination for debug trace records (only with `--debug`).  Driven by
/// the trace reporter thread, never by the reporting loop.
pub trait TraceSink {
    /// Receive a run of records, oldest first.
    fn trace(&mut self, records: &[TraceRecord]);
}
