//! GPIO character-device input adapter.
//!
//! Requests the pulse line as an input from the kernel GPIO character
//! device (`/dev/gpiochipN`) once at startup and wraps the resulting
//! [`CdevPin`].  Each sample is then a single line-value ioctl on the
//! held request, with no allocation.
//!
//! `--gpio` is the line offset on the chip, which on a Raspberry Pi header
//! chip equals the BCM number regardless of the kernel's global GPIO base.

use std::path::Path;

use embedded_hal::digital::{ErrorType, InputPin};
use linux_embedded_hal::CdevPin;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};

use crate::error::GpioError;

/// Consumer label shown by `gpioinfo` for the held line.
const CONSUMER: &str = "wellmeter";

pub struct CdevInputPin {
    line: u32,
    pin: CdevPin,
}

impl CdevInputPin {
    /// Open `chip` and request `line` as an input.
    pub fn open(chip: &Path, line: u32) -> Result<Self, GpioError> {
        let mut chip = Chip::new(chip).map_err(|_| GpioError::ChipOpenFailed)?;
        let handle = chip
            .get_line(line)
            .map_err(|_| GpioError::LineUnavailable(line))?
            .request(LineRequestFlags::INPUT, 0, CONSUMER)
            .map_err(|_| GpioError::RequestFailed(line))?;
        let pin = CdevPin::new(handle).map_err(|_| GpioError::RequestFailed(line))?;

        log::info!("gpio: line {} requested as input on {}", line, chip.path().display());
        Ok(Self { line, pin })
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl ErrorType for CdevInputPin {
    type Error = GpioError;
}

impl InputPin for CdevInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high().map_err(|_| GpioError::ReadFailed(self.line))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low().map_err(|_| GpioError::ReadFailed(self.line))
    }
}
