//! `embedded-hal` pin wrappers over the raw GPIO helpers in
//! [`hw_init`](super::hw_init).
//!
//! Lets the rangefinder and LED drivers stay generic over
//! [`OutputPin`]/[`InputPin`] while the firmware keeps addressing pins by
//! number from [`pins`](crate::pins).

use core::fmt;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;

/// `gpio_set_level` returned a non-OK code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError {
    pub pin: i32,
    pub code: i32,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{} write failed (rc={})", self.pin, self.code)
    }
}

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Push-pull output configured by `hw_init::init_peripherals`.
pub struct GpioOutput {
    pin: i32,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), GpioError> {
        hw_init::gpio_write(self.pin, false).map_err(|code| GpioError { pin: self.pin, code })
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        hw_init::gpio_write(self.pin, true).map_err(|code| GpioError { pin: self.pin, code })
    }
}

/// Floating/pulled input configured by `hw_init::init_peripherals`.
pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioInput {
    type Error = GpioError;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, GpioError> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}
