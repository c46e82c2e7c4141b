//! Unified error types for the meter.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! startup path in `main` uniform.  Variants are `Copy` so the sampler can
//! hand them across the thread boundary without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pulse input line could not be configured or read.
    Gpio(GpioError),
    /// Startup configuration is invalid.
    Config(ConfigError),
    /// The sampling thread could not be created.
    Spawn,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Spawn => write!(f, "sampler thread spawn failed"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The GPIO character device could not be opened.
    ChipOpenFailed,
    /// The chip has no line at this offset.
    LineUnavailable(u32),
    /// The line is busy or could not be requested as an input.
    RequestFailed(u32),
    /// Reading the line value failed.
    ReadFailed(u32),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChipOpenFailed => write!(f, "gpio chip open failed"),
            Self::LineUnavailable(line) => write!(f, "line {line}: no such line on chip"),
            Self::RequestFailed(line) => write!(f, "line {line}: input request failed"),
            Self::ReadFailed(line) => write!(f, "line {line}: read failed"),
        }
    }
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The starting total did not parse as a non-negative integer.
    InvalidStartTotal,
    /// An option that needs a value was last on the command line.
    MissingValue(&'static str),
    /// `--gpio` did not parse as a line number.
    InvalidGpio,
    /// Sampler priority is outside the `SCHED_FIFO` range.
    InvalidPriority,
    /// An unrecognised `--option`.
    UnknownOption,
    /// More than one positional argument.
    UnexpectedArgument,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStartTotal => {
                write!(f, "starting total must be a non-negative integer")
            }
            Self::MissingValue(opt) => write!(f, "{opt} requires a value"),
            Self::InvalidGpio => write!(f, "--gpio must be a line number"),
            Self::InvalidPriority => write!(f, "sampler priority must be within 1..=99"),
            Self::UnknownOption => write!(f, "unknown option"),
            Self::UnexpectedArgument => write!(f, "unexpected extra argument"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
