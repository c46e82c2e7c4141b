//! Runtime configuration
//!
//! Startup parameters for the meter.  Defaults come from [`pins`] and the
//! constants below; the command line can override them.  The debounce
//! constants are deliberately not here: they live in
//! [`edge_filter`](crate::sensors::edge_filter) and are fixed at build time.
//!
//! ```text
//! wellmeter [START_TOTAL] [--debug] [--status-file PATH] [--chip DEV] [--gpio N] [--priority P]
//! ```
//!
//! [`pins`]: crate::pins

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::drivers::realtime::SAMPLER_PRIORITY;
use crate::error::ConfigError;
use crate::pins;

/// Status file served to the local web page.
pub const DEFAULT_STATUS_PATH: &str = "/var/www/html/well.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterConfig {
    /// GPIO character device holding the pulse line.
    pub gpio_chip: PathBuf,
    /// Pulse input line offset on `gpio_chip` (BCM numbering on a Pi).
    pub pulse_gpio: u32,
    /// Where the JSON status record is written.
    pub status_path: PathBuf,
    /// Total to resume counting from.
    pub start_total: u64,
    /// Record and print the raw sample trace.
    pub debug: bool,
    /// `SCHED_FIFO` priority requested for the sampler thread.
    pub sampler_priority: i32,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            gpio_chip: PathBuf::from(pins::GPIO_CHIP),
            pulse_gpio: pins::PULSE_GPIO,
            status_path: PathBuf::from(DEFAULT_STATUS_PATH),
            start_total: 0,
            debug: false,
            sampler_priority: SAMPLER_PRIORITY,
        }
    }
}

impl MeterConfig {
    /// Build a config from command-line arguments (program name excluded).
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut seen_total = false;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--debug" => config.debug = true,
                "--status-file" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--status-file"))?;
                    config.status_path = PathBuf::from(v.as_ref());
                }
                "--chip" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--chip"))?;
                    config.gpio_chip = PathBuf::from(v.as_ref());
                }
                "--gpio" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--gpio"))?;
                    config.pulse_gpio = v.as_ref().parse().map_err(|_| ConfigError::InvalidGpio)?;
                }
                "--priority" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--priority"))?;
                    config.sampler_priority =
                        v.as_ref().parse().map_err(|_| ConfigError::InvalidPriority)?;
                }
                opt if opt.starts_with("--") => return Err(ConfigError::UnknownOption),
                total => {
                    if seen_total {
                        return Err(ConfigError::UnexpectedArgument);
                    }
                    config.start_total = parse_start_total(total)?;
                    seen_total = true;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Range-check the fields the parser cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("--status-file"));
        }
        if !(1..=99).contains(&self.sampler_priority) {
            return Err(ConfigError::InvalidPriority);
        }
        Ok(())
    }
}

/// Parse a starting total; only plain non-negative decimal integers pass.
pub fn parse_start_total(s: &str) -> Result<u64, ConfigError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidStartTotal);
    }
    s.parse().map_err(|_| ConfigError::InvalidStartTotal)
}
