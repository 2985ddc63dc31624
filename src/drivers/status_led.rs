//! Single-colour status LED driver.
//!
//! Plays a [`Pattern`] by toggling one GPIO and blocking on the caller's
//! delay between steps. The LED is the only feedback an operator gets
//! without a serial console attached.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::drivers::led_patterns::Pattern;
use crate::error::IndicatorError;

pub struct StatusLed<P> {
    pin: P,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn set(&mut self, on: bool) -> Result<(), IndicatorError> {
        let res = if on { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|_| IndicatorError::GpioWriteFailed)
    }

    /// Play `pattern` to completion. The LED is left off.
    pub fn play(&mut self, pattern: Pattern, delay: &mut impl DelayNs) -> Result<(), IndicatorError> {
        for step in pattern.steps() {
            self.set(step.on)?;
            if step.ms > 0 {
                delay.delay_ms(step.ms);
            }
        }
        Ok(())
    }
}
