//! GPIO line assignments and the chip device for the meter host.
//!
//! Single source of truth: the config defaults reference this module
//! rather than hard-coding numbers.

// ---------------------------------------------------------------------------
// Pulse input
// ---------------------------------------------------------------------------

/// Reed-switch pulse output from the water meter, BCM numbering
/// (header pin 16, wiringPi pin 4).  Active LOW with an external pull-up.
pub const PULSE_GPIO: u32 = 23;

// ---------------------------------------------------------------------------
// GPIO character device
// ---------------------------------------------------------------------------

/// Chip carrying the 40-pin header lines.  On a Pi 5 with an older kernel
/// the header is `/dev/gpiochip4`; pass `--chip` there.
pub const GPIO_CHIP: &str = "/dev/gpiochip0";
