//! HC-SR04 ultrasonic rangefinder driver.
//!
//! A HIGH pulse on TRIG makes the module emit a 40 kHz burst; ECHO then
//! goes HIGH for the round-trip time of the sound. Distance is half the
//! round trip at the speed of sound (0.034 cm/µs).
//!
//! The driver is generic over `embedded-hal` pins so the same code runs on
//! the ESP32 GPIO wrappers and on host-side fakes. Echo timing reads a
//! [`ClockPort`]; the trigger pulse uses the caller's `DelayNs`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::ClockPort;
use crate::error::SensorError;

/// Low time before the trigger pulse, and width of the pulse itself.
pub const TRIGGER_SETTLE_US: u32 = 80;
pub const TRIGGER_PULSE_US: u32 = 80;

/// Give up on the echo after this long (≈5 m round trip).
pub const ECHO_TIMEOUT_US: u32 = 30_000;

/// Speed of sound in cm/µs.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.034;

/// Flat "no echo" value for log lines and callers that want a number.
pub const NO_ECHO_CM: f32 = -1.0;

/// Convert an echo pulse width to centimetres. `0` means no echo.
pub fn duration_to_distance_cm(duration_us: u32) -> Option<f32> {
    if duration_us == 0 {
        return None;
    }
    Some(duration_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0)
}

/// Like [`duration_to_distance_cm`] but folds "no echo" into [`NO_ECHO_CM`].
pub fn distance_or_sentinel(duration_us: u32) -> f32 {
    duration_to_distance_cm(duration_us).unwrap_or(NO_ECHO_CM)
}

pub struct UltrasonicSensor<T, E, C> {
    trig: T,
    echo: E,
    clock: C,
    timeout_us: u32,
}

impl<T, E, C> UltrasonicSensor<T, E, C>
where
    T: OutputPin,
    E: InputPin,
    C: ClockPort,
{
    pub fn new(trig: T, echo: E, clock: C) -> Self {
        Self {
            trig,
            echo,
            clock,
            timeout_us: ECHO_TIMEOUT_US,
        }
    }

    /// Fire one ping and return the distance in centimetres.
    pub fn measure(&mut self, delay: &mut impl DelayNs) -> Result<f32, SensorError> {
        self.fire(delay)?;
        let duration = self.echo_pulse_us()?;
        duration_to_distance_cm(duration).ok_or(SensorError::NoEcho)
    }

    fn fire(&mut self, delay: &mut impl DelayNs) -> Result<(), SensorError> {
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)?;
        delay.delay_us(TRIGGER_SETTLE_US);
        self.trig.set_high().map_err(|_| SensorError::GpioWriteFailed)?;
        delay.delay_us(TRIGGER_PULSE_US);
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)?;
        Ok(())
    }

    /// Width of the next HIGH pulse on ECHO in µs, or 0 if the pulse did
    /// not start and finish before the timeout.
    fn echo_pulse_us(&mut self) -> Result<u32, SensorError> {
        let deadline = self.clock.now_us() + u64::from(self.timeout_us);

        // A pulse already in progress is not ours.
        while self.echo_high()? {
            if self.clock.now_us() >= deadline {
                return Ok(0);
            }
        }
        while !self.echo_high()? {
            if self.clock.now_us() >= deadline {
                return Ok(0);
            }
        }
        let rise = self.clock.now_us();
        while self.echo_high()? {
            if self.clock.now_us() >= deadline {
                return Ok(0);
            }
        }
        let fall = self.clock.now_us();

        Ok(u32::try_from(fall.saturating_sub(rise)).unwrap_or(0))
    }

    fn echo_high(&mut self) -> Result<bool, SensorError> {
        self.echo.is_high().map_err(|_| SensorError::GpioReadFailed)
    }
}
