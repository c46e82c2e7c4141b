//! Fuzz target: `EdgeFilter::sample`
//!
//! Expands arbitrary bytes into a sample stream (one bit per tick, LSB
//! first) and asserts the debounce invariants: emissions are at least the
//! spacing floor apart and each one ends a run of confirm-window lows.
//!
//! cargo fuzz run fuzz_edge_filter

#![no_main]

use libfuzzer_sys::fuzz_target;
use wellmeter::sensors::edge_filter::{CONFIRM_TICKS, EdgeFilter, MIN_EVENT_SPACING_TICKS};

fuzz_target!(|data: &[u8]| {
    let mut filter = EdgeFilter::new();
    let mut last_emit: Option<usize> = None;
    let mut low_run = 0u32;

    let samples = data.iter().flat_map(|b| (0..8).map(move |bit| b & (1 << bit) != 0));
    for (tick, high) in samples.enumerate() {
        low_run = if high { 0 } else { low_run + 1 };

        if filter.sample(high) {
            assert!(low_run >= CONFIRM_TICKS, "emitted after {low_run} lows");
            if let Some(prev) = last_emit {
                assert!(
                    tick - prev >= MIN_EVENT_SPACING_TICKS as usize,
                    "emissions {prev} and {tick} too close"
                );
            }
            last_emit = Some(tick);
        }
    }
});
