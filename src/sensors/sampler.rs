//! Pulse-line sampler: reads the pin once per tick, runs the
//! [`EdgeFilter`], and hands confirmed presses to the [`EventChannel`].
//!
//! Runs on the dedicated high-priority thread.  A tick does no blocking
//! I/O beyond the pin read and allocates nothing; all formatting and
//! publishing happen on the reporting side.

use embedded_hal::digital::InputPin;

use super::edge_filter::EdgeFilter;
use crate::app::ports::Clock;
use crate::diagnostics::TraceRecorder;
use crate::drivers::tick_timer::TickTimer;
use crate::events::{EventChannel, PulseEvent};

pub struct Sampler<'t, P: InputPin, C: Clock> {
    pin: P,
    clock: C,
    filter: EdgeFilter,
    trace: Option<TraceRecorder<'t>>,
    ticks: u64,
}

impl<'t, P: InputPin, C: Clock> Sampler<'t, P, C> {
    pub fn new(pin: P, clock: C) -> Self {
        Self {
            pin,
            clock,
            filter: EdgeFilter::new(),
            trace: None,
            ticks: 0,
        }
    }

    /// Record level changes into the debug trace queue.
    pub fn with_trace(mut self, recorder: TraceRecorder<'t>) -> Self {
        self.trace = Some(recorder);
        self
    }

    /// Sample the pin once.  Returns the event if this tick confirmed a
    /// press; the event has already been sent on `channel`.
    pub fn tick(&mut self, channel: &EventChannel) -> Result<Option<PulseEvent>, P::Error> {
        let high = self.pin.is_high()?;
        self.ticks += 1;

        if let Some(trace) = self.trace.as_mut() {
            trace.observe(self.clock.monotonic_ms(), high);
        }

        if !self.filter.sample(high) {
            return Ok(None);
        }

        let event = PulseEvent {
            wall_clock_secs: self.clock.wall_clock_secs(),
            monotonic_ms: self.clock.monotonic_ms(),
        };
        channel.send(event);
        Ok(Some(event))
    }

    /// Sample forever at the timer's cadence.  Only returns when the pin
    /// can no longer be read.
    pub fn run(mut self, channel: &EventChannel, timer: &mut TickTimer) -> P::Error {
        loop {
            timer.wait();
            if let Err(e) = self.tick(channel) {
                return e;
            }
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
