//! Outbound application events.
//!
//! The [`DoorMonitor`](super::service::DoorMonitor) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them. In production they become log lines.

use crate::calibration::Calibration;
use crate::door::DoorEvent;
use crate::error::SensorError;

use super::report::ReportOutcome;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The monitor has started its boot sequence.
    Started,

    /// WiFi associated after `attempts` polls.
    NetworkAssociated { attempts: u8 },

    /// WiFi did not come up within the allowed polls; calibration is skipped.
    NetworkUnavailable { attempts: u8 },

    /// Calibration ran (it may still have produced no baseline).
    Calibrated(Calibration),

    /// Calibration was not attempted because the network never came up.
    CalibrationSkipped,

    /// Monitoring loop entered with this baseline and threshold.
    Monitoring { baseline_cm: f32, threshold_cm: f32 },

    /// A ping produced no usable distance; the cycle was skipped.
    BadReading(SensorError),

    /// The door changed state.
    DoorChanged { event: DoorEvent, distance_cm: f32 },

    /// A delivery attempt for `event` finished.
    Reported { event: DoorEvent, outcome: ReportOutcome },
}
