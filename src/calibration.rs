//! Boot-time baseline calibration.
//!
//! Takes a handful of pings with the door assumed closed and averages the
//! ones that produced an echo. Invalid pings are dropped, not retried.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::RangefinderPort;
use crate::error::SensorError;

/// Result of one calibration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Pings attempted.
    pub samples: u8,
    /// Pings that returned a positive distance.
    pub valid: u8,
    /// Mean of the valid pings; `None` when `valid == 0`.
    pub baseline_cm: Option<f32>,
}

impl Calibration {
    /// Average the usable readings out of `readings`.
    pub fn from_readings<I>(readings: I) -> Self
    where
        I: IntoIterator<Item = Result<f32, SensorError>>,
    {
        let mut samples: u32 = 0;
        let mut valid: u32 = 0;
        let mut total = 0.0_f32;

        for reading in readings {
            samples = samples.saturating_add(1);
            if let Ok(cm) = reading {
                if cm > 0.0 {
                    total += cm;
                    valid = valid.saturating_add(1);
                }
            }
        }

        // Counters saturate in the record; the mean uses the full count.
        let baseline_cm = (valid > 0).then(|| total / valid as f32);
        Self {
            samples: u8::try_from(samples).unwrap_or(u8::MAX),
            valid: u8::try_from(valid).unwrap_or(u8::MAX),
            baseline_cm,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.baseline_cm.is_some()
    }
}

/// Take `samples` pings, waiting `interval_ms` after each one.
pub fn calibrate(
    hw: &mut (impl RangefinderPort + DelayNs),
    samples: u8,
    interval_ms: u32,
) -> Calibration {
    Calibration::from_readings((0..samples).map(|i| {
        let reading = hw.measure_cm();
        match reading {
            Ok(cm) => info!("Calibration sample {}/{}: {:.1} cm", i + 1, samples, cm),
            Err(e) => warn!("Calibration sample {}/{}: {}", i + 1, samples, e),
        }
        hw.delay_ms(interval_ms);
        reading
    }))
}
