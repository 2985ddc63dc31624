//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production). Nothing on the
//! device parses these lines; they are for a developer with a cable.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::report::ReportOutcome;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | self test");
            }
            AppEvent::NetworkAssociated { attempts } => {
                info!("NET   | associated after {} poll(s)", attempts);
            }
            AppEvent::NetworkUnavailable { attempts } => {
                warn!("NET   | not associated after {} poll(s), continuing uncalibrated", attempts);
            }
            AppEvent::Calibrated(cal) => match cal.baseline_cm {
                Some(b) => info!("CAL   | baseline={:.1}cm ({}/{} valid)", b, cal.valid, cal.samples),
                None => warn!("CAL   | no valid samples ({} taken), baseline stays 0", cal.samples),
            },
            AppEvent::CalibrationSkipped => {
                warn!("CAL   | skipped (no network)");
            }
            AppEvent::Monitoring { baseline_cm, threshold_cm } => {
                info!("LOOP  | open above {:.1}cm", baseline_cm + threshold_cm);
            }
            AppEvent::BadReading(e) => {
                log::debug!("PING  | {}", e);
            }
            AppEvent::DoorChanged { event, distance_cm } => {
                info!("DOOR  | {} at {:.1}cm", event, distance_cm);
            }
            AppEvent::Reported { event, outcome } => match outcome {
                ReportOutcome::Delivered(status) => {
                    info!("POST  | {} delivered (HTTP {})", event, status);
                }
                ReportOutcome::Rejected(status) => {
                    warn!("POST  | {} rejected (HTTP {})", event, status);
                }
                ReportOutcome::TransportFailed(e) => {
                    warn!("POST  | {} failed: {}", event, e);
                }
                ReportOutcome::NetworkDown => {
                    warn!("POST  | {} dropped, WiFi down", event);
                }
            },
        }
    }
}
