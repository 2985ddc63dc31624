//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorMonitor (domain)
//! ```
//!
//! Driven adapters (rangefinder, LED, WiFi, HTTP reporter, event sinks)
//! implement these traits. The [`DoorMonitor`](super::service::DoorMonitor)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Blocking delays are not a port of their own: the monitor takes
//! [`embedded_hal::delay::DelayNs`] so tests can substitute a fake clock.

use core::fmt;

use crate::door::DoorEvent;
use crate::drivers::led_patterns::PatternId;
use crate::error::{CommsError, IndicatorError, SensorError};

// ───────────────────────────────────────────────────────────────
// Rangefinder port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain a distance.
pub trait RangefinderPort {
    /// One ping. `Err(SensorError::NoEcho)` when nothing came back in time.
    fn measure_cm(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LED)
// ───────────────────────────────────────────────────────────────

/// Plays a blocking LED pattern.
pub trait IndicatorPort {
    fn show(&mut self, pattern: PatternId) -> Result<(), IndicatorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (monotonic microseconds, used for echo timing)
// ───────────────────────────────────────────────────────────────

pub trait ClockPort {
    /// Microseconds since boot. Must never go backwards.
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Connectivity port (driven adapter: domain ↔ WiFi station)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

impl From<ConnectivityError> for CommsError {
    fn from(_: ConnectivityError) -> Self {
        CommsError::WifiConnectFailed
    }
}

pub trait ConnectivityPort {
    /// Start associating with the configured access point. Non-blocking;
    /// poll [`is_connected`](Self::is_connected) for the result.
    fn begin(&mut self) -> Result<(), ConnectivityError>;

    /// Whether the station is associated and has an IP right now.
    fn is_connected(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Report port (driven adapter: domain → remote HTTP endpoint)
// ───────────────────────────────────────────────────────────────

/// Delivers one door event. Returns the HTTP status code; the caller
/// decides what counts as success.
pub trait ReportPort {
    fn post(&mut self, event: DoorEvent) -> Result<u16, CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
