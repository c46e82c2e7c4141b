//! Integration tests for the `--debug` trace path: Sampler → TraceBuffer →
//! TraceReporter, independent of confirmed presses.

use std::sync::mpsc;
use std::time::Duration;

use super::mock_hw::{ChannelTraceSink, ManualClock, RecordingSink, ScriptedPin};

use wellmeter::diagnostics::{TRACE_QUEUE_SLOTS, TraceBuffer, TraceRecord, TraceReporter};
use wellmeter::events::EventChannel;
use wellmeter::sensors::Sampler;

#[test]
fn chatter_without_a_press_is_still_traced() {
    let clock = ManualClock::new(0, 1_760_000_000);
    let channel = EventChannel::new();
    let mut sink = RecordingSink::new();

    let mut buffer = TraceBuffer::new();
    let (recorder, reader) = buffer.split();

    // Never 32 idle samples in a row, so the filter never arms.
    let runs: Vec<(bool, usize)> = (0..30).flat_map(|_| [(true, 10), (false, 1)]).collect();
    let mut sampler = Sampler::new(ScriptedPin::from_runs(&runs), &clock).with_trace(recorder);
    loop {
        clock.advance(1);
        if sampler.tick(&channel).is_err() {
            break;
        }
    }
    assert!(channel.is_empty(), "no press was confirmed");

    let mut reporter = TraceReporter::new(reader, Duration::from_millis(10));
    assert_eq!(reporter.flush(&mut sink), 60);
    assert!(sink.snapshots.is_empty());
    assert_eq!(sink.traces[0], TraceRecord { millis: 1, level: true });
    assert_eq!(sink.traces[1], TraceRecord { millis: 11, level: false });
}

#[test]
fn reporter_thread_delivers_on_its_own_cadence() {
    let buffer: &'static mut TraceBuffer = Box::leak(Box::new(TraceBuffer::new()));
    let (mut recorder, reader) = buffer.split();

    // Overfill the queue before the reporter starts.
    for ms in 0..200 {
        recorder.observe(ms, ms % 2 == 0);
    }

    let (tx, rx) = mpsc::channel();
    let reporter = TraceReporter::new(reader, Duration::from_millis(10));
    std::thread::spawn(move || reporter.run(&mut ChannelTraceSink(tx)));

    let mut received = 0;
    while received < TRACE_QUEUE_SLOTS - 1 {
        let run = rx
            .recv_timeout(Duration::from_secs(3))
            .expect("trace flushed without any event");
        received += run.len();
    }
    assert_eq!(received, TRACE_QUEUE_SLOTS - 1);

    // Later changes arrive on a subsequent flush.
    recorder.observe(500, true);
    recorder.observe(501, false);
    let mut later = Vec::new();
    while later.len() < 2 {
        later.extend(rx.recv_timeout(Duration::from_secs(3)).expect("second flush"));
    }
    assert_eq!(
        later,
        vec![
            TraceRecord { millis: 500, level: true },
            TraceRecord { millis: 501, level: false },
        ]
    );
}
