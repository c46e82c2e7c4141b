//! Integration tests for the Sampler → EventChannel → MeterService pipeline.
//!
//! These run on the host and drive the sampler one tick at a time with a
//! scripted pin and a manual 1 ms clock.

use super::mock_hw::{ManualClock, RecordingSink, ScriptedPin};

use wellmeter::app::events::StatusRecord;
use wellmeter::app::service::MeterService;
use wellmeter::diagnostics::{TraceBuffer, TraceRecord, forward_trace};
use wellmeter::drivers::tick_timer::TickTimer;
use wellmeter::error::GpioError;
use wellmeter::events::EventChannel;
use wellmeter::sensors::Sampler;

/// Tick the sampler until the script runs out, advancing the clock 1 ms
/// before each sample.
fn run_script<P: embedded_hal::digital::InputPin>(
    sampler: &mut Sampler<'_, P, &ManualClock>,
    clock: &ManualClock,
    channel: &EventChannel,
) -> usize {
    let mut events = 0;
    loop {
        clock.advance(1);
        match sampler.tick(channel) {
            Ok(Some(_)) => events += 1,
            Ok(None) => {}
            Err(_) => return events,
        }
    }
}

#[test]
fn two_presses_end_to_end() {
    let clock = ManualClock::new(0, 1_760_000_000);
    let channel = EventChannel::new();
    let mut sink = RecordingSink::new();

    let mut service = MeterService::new(0, &clock);
    service.start(&mut sink);

    let pin = ScriptedPin::from_runs(&[(true, 32), (false, 3), (true, 32), (false, 3)]);
    let mut sampler = Sampler::new(pin, &clock);
    assert_eq!(run_script(&mut sampler, &clock, &channel), 2);
    assert_eq!(sampler.ticks(), 70);

    assert_eq!(service.poll(&channel, &mut sink), 2);
    assert_eq!(service.total(), 2);

    // Startup push + one per event.
    assert_eq!(sink.snapshots.len(), 3);
    let second = sink.last().unwrap();
    assert_eq!(second.last_event_monotonic_ms, 70);
    let rate = second.rate_per_minute.unwrap();
    assert!((rate - 60_000.0 / 35.0).abs() < 1e-3, "rate {rate}");

    let record = StatusRecord::from_snapshot(second, 0);
    assert!((record.gpm - 1714.3).abs() < 1e-3, "gpm {}", record.gpm);
    assert_eq!(record.total, 2);
}

#[test]
fn startup_push_publishes_seed_with_unknown_rate() {
    let clock = ManualClock::new(500, 1_760_000_000);
    let mut sink = RecordingSink::new();
    let mut service = MeterService::new(1_000, &clock);

    let s = service.start(&mut sink);
    assert!(service.is_started());
    assert_eq!(s.total_events, 1_000);
    assert_eq!(s.rate_per_minute, None);
    assert_eq!(s.last_event_wall_clock, Some(1_760_000_000));
    assert_eq!(sink.snapshots, vec![s]);
}

#[test]
fn seeded_total_counts_on() {
    let clock = ManualClock::new(0, 1_760_000_000);
    let channel = EventChannel::new();
    let mut sink = RecordingSink::new();
    let mut service = MeterService::new(41, &clock);
    service.start(&mut sink);

    let pin = ScriptedPin::from_runs(&[(true, 40), (false, 10)]);
    run_script(&mut Sampler::new(pin, &clock), &clock, &channel);
    service.poll(&channel, &mut sink);

    assert_eq!(service.total(), 42);
}

#[test]
fn chattering_contact_counts_once() {
    let clock = ManualClock::new(0, 1_760_000_000);
    let channel = EventChannel::new();

    // Bounce on both edges of a single press.
    let pin = ScriptedPin::from_runs(&[
        (true, 40),
        (false, 1),
        (true, 1),
        (false, 2),
        (true, 1),
        (false, 30),
        (true, 2),
        (false, 1),
        (true, 5),
        (false, 1),
        (true, 60),
    ]);
    let events = run_script(&mut Sampler::new(pin, &clock), &clock, &channel);
    assert_eq!(events, 1);
    assert_eq!(channel.len(), 1);
}

#[test]
fn events_arrive_in_order_with_increasing_totals() {
    let clock = ManualClock::new(0, 1_760_000_000);
    let channel = EventChannel::new();
    let mut sink = RecordingSink::new();
    let mut service = MeterService::new(0, &clock);
    service.start(&mut sink);

    let mut runs = Vec::new();
    for gap in [40, 100, 35, 500] {
        runs.push((true, gap));
        runs.push((false, 4));
    }
    let pin = ScriptedPin::from_runs(&runs);
    assert_eq!(run_script(&mut Sampler::new(pin, &clock), &clock, &channel), 4);
    service.poll(&channel, &mut sink);

    let totals: Vec<u64> = sink.snapshots.iter().map(|s| s.total_events).collect();
    assert_eq!(totals, vec![0, 1, 2, 3, 4]);
    let stamps: Vec<u32> = sink.snapshots[1..].iter().map(|s| s.last_event_monotonic_ms).collect();
    assert!(stamps.windows(2).all(|w| w[0] < w[1]), "{stamps:?}");
}

#[test]
fn rate_survives_clock_wrap() {
    let clock = ManualClock::new(u32::MAX - 40, 1_760_000_000);
    let channel = EventChannel::new();
    let mut sink = RecordingSink::new();
    let mut service = MeterService::new(0, &clock);

    let pin = ScriptedPin::from_runs(&[(true, 32), (false, 3), (true, 32), (false, 3)]);
    run_script(&mut Sampler::new(pin, &clock), &clock, &channel);
    service.poll(&channel, &mut sink);

    // The second event lands after the u32 wrap.
    let second = sink.last().unwrap();
    assert!(second.last_event_monotonic_ms < 100);
    assert_eq!(second.rate_per_minute, Some(60_000.0 / 35.0));
}

#[test]
fn debug_trace_reaches_sink() {
    let clock = ManualClock::new(0, 1_760_000_000);
    let channel = EventChannel::new();
    let mut sink = RecordingSink::new();

    let mut buffer = TraceBuffer::new();
    let (recorder, mut reader) = buffer.split();

    let pin = ScriptedPin::from_runs(&[(true, 32), (false, 3), (true, 2)]);
    let mut sampler = Sampler::new(pin, &clock).with_trace(recorder);
    run_script(&mut sampler, &clock, &channel);

    assert_eq!(forward_trace(&mut reader, &mut sink), 3);
    assert_eq!(
        sink.traces,
        vec![
            TraceRecord { millis: 1, level: true },
            TraceRecord { millis: 33, level: false },
            TraceRecord { millis: 36, level: true },
        ]
    );
}

#[test]
fn sampler_run_returns_read_error() {
    let clock = ManualClock::new(0, 0);
    let channel = EventChannel::new();
    let pin = ScriptedPin::from_runs(&[(true, 32), (false, 3)]);

    let mut timer = TickTimer::new(std::time::Duration::from_micros(100));
    let err = Sampler::new(pin, &clock).run(&channel, &mut timer);

    assert_eq!(err, GpioError::ReadFailed(99));
    assert_eq!(channel.len(), 1, "event before the failure is delivered");
}
