//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the rangefinder, the status LED and the blocking delay, exposing
//! them through [`RangefinderPort`], [`IndicatorPort`] and `DelayNs`. The
//! three share one delay so a single `&mut` reaches everything the
//! monitor needs per cycle. On non-espidf targets the GPIO wrappers run
//! against the simulated pin bank in `hw_init`.

use embedded_hal::delay::DelayNs;

use crate::adapters::time::{Esp32TimeAdapter, SystemDelay};
use crate::app::ports::{IndicatorPort, RangefinderPort};
use crate::drivers::gpio::{GpioInput, GpioOutput};
use crate::drivers::led_patterns::PatternId;
use crate::drivers::status_led::StatusLed;
use crate::error::{IndicatorError, SensorError};
use crate::pins;
use crate::sensors::ultrasonic::UltrasonicSensor;

pub type Rangefinder = UltrasonicSensor<GpioOutput, GpioInput, Esp32TimeAdapter>;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    rangefinder: Rangefinder,
    led: StatusLed<GpioOutput>,
    delay: SystemDelay,
}

impl HardwareAdapter {
    pub fn new(rangefinder: Rangefinder, led: StatusLed<GpioOutput>, delay: SystemDelay) -> Self {
        Self {
            rangefinder,
            led,
            delay,
        }
    }

    /// Wire up the board's pins as assigned in [`pins`].
    pub fn from_board_pins() -> Self {
        Self::new(
            UltrasonicSensor::new(
                GpioOutput::new(pins::TRIG_GPIO),
                GpioInput::new(pins::ECHO_GPIO),
                Esp32TimeAdapter::new(),
            ),
            StatusLed::new(GpioOutput::new(pins::LED_GPIO)),
            SystemDelay::new(),
        )
    }
}

// ── RangefinderPort implementation ────────────────────────────

impl RangefinderPort for HardwareAdapter {
    fn measure_cm(&mut self) -> Result<f32, SensorError> {
        self.rangefinder.measure(&mut self.delay)
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn show(&mut self, pattern: PatternId) -> Result<(), IndicatorError> {
        let shape = pattern.pattern();
        log::debug!("LED {:?} ({} ms)", pattern, shape.duration_ms());
        self.led.play(shape, &mut self.delay)
    }
}

// ── Blocking delay ────────────────────────────────────────────

impl DelayNs for HardwareAdapter {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
