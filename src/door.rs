//! Door state evaluation.
//!
//! The rangefinder faces the door from the frame. With the door closed it
//! reads the calibrated baseline; an open door moves the leaf away and the
//! reading jumps by more than the threshold.
//!
//! [`DoorEvaluator`] holds the baseline and the last reported state and
//! turns each reading into at most one [`DoorEvent`]. It is edge-triggered:
//! repeated readings on the same side of the threshold emit nothing.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A detected transition. Serialises to the `event_type` strings the
/// backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorEvent {
    Opened,
    Closed,
}

impl DoorEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for DoorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct DoorEvaluator {
    baseline_cm: f32,
    threshold_cm: f32,
    door_open: bool,
}

impl DoorEvaluator {
    /// Baseline starts at 0 until [`set_baseline`](Self::set_baseline) is
    /// called; the door starts closed.
    pub fn new(threshold_cm: f32) -> Self {
        Self {
            baseline_cm: 0.0,
            threshold_cm,
            door_open: false,
        }
    }

    pub fn set_baseline(&mut self, baseline_cm: f32) {
        self.baseline_cm = baseline_cm;
    }

    pub fn baseline_cm(&self) -> f32 {
        self.baseline_cm
    }

    pub fn threshold_cm(&self) -> f32 {
        self.threshold_cm
    }

    /// Last reported state. Not rolled back if delivery of that report failed.
    pub fn is_open(&self) -> bool {
        self.door_open
    }

    /// Pure classification of one reading.
    pub fn classify(&self, distance_cm: f32) -> bool {
        distance_cm > self.baseline_cm + self.threshold_cm
    }

    /// Classify `distance_cm` and return the transition, if any.
    pub fn update(&mut self, distance_cm: f32) -> Option<DoorEvent> {
        let open_now = self.classify(distance_cm);
        match (open_now, self.door_open) {
            (true, false) => {
                self.door_open = true;
                Some(DoorEvent::Opened)
            }
            (false, true) => {
                self.door_open = false;
                Some(DoorEvent::Closed)
            }
            _ => None,
        }
    }
}
