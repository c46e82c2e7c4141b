//! Wellmeter entry point.
//!
//! Two threads cooperating through one bounded channel, plus a trace
//! reporter with `--debug`:
//!
//! ```text
//! ┌──────────────────────────┐               ┌──────────────────────────┐
//! │ sampler (SCHED_FIFO)     │  PulseEvent   │ main (reporting loop)    │
//! │ CdevInputPin → Sampler   │──────────────▶│ MeterService → sinks     │
//! │ EdgeFilter @ 1 kHz       │ EventChannel  │ JSON file · stdout · log │
//! └──────────────────────────┘               └──────────────────────────┘
//!              │ TraceRecord (spsc)          ┌──────────────────────────┐
//!              └────────────────────────────▶│ trace (1 s flush)        │
//!                                            └──────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info};

use wellmeter::adapters::console::ConsoleTraceSink;
use wellmeter::adapters::gpio::CdevInputPin;
use wellmeter::adapters::log_sink::{LogStatusSink, TeeSink};
use wellmeter::adapters::status_file::JsonFileStatusSink;
use wellmeter::adapters::time::SystemClock;
use wellmeter::app::service::MeterService;
use wellmeter::config::MeterConfig;
use wellmeter::diagnostics::{self, TRACE_FLUSH_INTERVAL, TraceBuffer, TraceReporter};
use wellmeter::drivers::realtime::spawn_realtime;
use wellmeter::drivers::tick_timer::TickTimer;
use wellmeter::error::Error;
use wellmeter::events::EventChannel;
use wellmeter::sensors::Sampler;
use wellmeter::sensors::edge_filter::SAMPLE_PERIOD_US;

static EVENT_CHANNEL: EventChannel = EventChannel::new();

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("wellmeter v{}", env!("CARGO_PKG_VERSION"));
    diagnostics::install_panic_handler();

    // ── 2. Configuration ──────────────────────────────────────
    let config = MeterConfig::from_args(std::env::args().skip(1))
        .map_err(Error::from)
        .context("invalid command line")?;
    info!(
        "Config: chip={} gpio={} status={} start_total={} debug={}",
        config.gpio_chip.display(),
        config.pulse_gpio,
        config.status_path.display(),
        config.start_total,
        config.debug
    );

    // ── 3. Hardware ───────────────────────────────────────────
    let pin = CdevInputPin::open(&config.gpio_chip, config.pulse_gpio)
        .map_err(Error::from)
        .with_context(|| {
            format!(
                "cannot open pulse line {} on {}",
                config.pulse_gpio,
                config.gpio_chip.display()
            )
        })?;
    let clock = SystemClock::new();

    // ── 4. Optional sample trace ──────────────────────────────
    let recorder = if config.debug {
        let buffer: &'static mut TraceBuffer = Box::leak(Box::new(TraceBuffer::new()));
        let (recorder, reader) = buffer.split();
        let reporter = TraceReporter::new(reader, TRACE_FLUSH_INTERVAL);
        std::thread::Builder::new()
            .name("trace".into())
            .spawn(move || reporter.run(&mut ConsoleTraceSink::stdout()))
            .map_err(|_| Error::Spawn)
            .context("cannot start trace reporter")?;
        Some(recorder)
    } else {
        None
    };

    // ── 5. Sampler thread ─────────────────────────────────────
    let mut sampler = Sampler::new(pin, clock);
    if let Some(recorder) = recorder {
        sampler = sampler.with_trace(recorder);
    }
    let line = config.pulse_gpio;
    spawn_realtime("sampler", config.sampler_priority, move || {
        let mut timer = TickTimer::new(Duration::from_micros(SAMPLE_PERIOD_US));
        let err = sampler.run(&EVENT_CHANNEL, &mut timer);
        error!("sampler: pulse line {} unreadable ({}), exiting", line, err);
        std::process::exit(1);
    })
    .map_err(|_| Error::Spawn)
    .context("cannot start sampler")?;

    // ── 6. Reporting loop (never returns) ─────────────────────
    let mut sink = TeeSink {
        first: JsonFileStatusSink::stdout(config.status_path.clone()),
        second: LogStatusSink::new(),
    };
    MeterService::new(config.start_total, clock).run(&EVENT_CHANNEL, &mut sink)
}
