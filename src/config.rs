//! System configuration parameters
//!
//! All tunable parameters for the doorsense device. Everything is compiled
//! in; nothing is persisted. Credentials and the reporting endpoint are
//! injected at construction via [`NetworkConfig`] and [`ReporterConfig`].

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Door detection ---
    /// Distance above baseline (cm) at which the door counts as open
    pub open_threshold_cm: f32,

    // --- Calibration ---
    /// Number of rangefinder samples averaged into the baseline
    pub calibration_samples: u8,
    /// Delay after each calibration sample (milliseconds)
    pub calibration_interval_ms: u32,

    // --- Timing ---
    /// Delay between monitoring cycles (milliseconds)
    pub poll_interval_ms: u32,
    /// Delay before retrying after a reading without echo (milliseconds)
    pub bad_reading_retry_ms: u32,

    // --- Network ---
    /// Association attempts before giving up at boot
    pub wifi_connect_attempts: u8,
    /// Delay between association attempts (milliseconds)
    pub wifi_retry_interval_ms: u32,

    // --- Indicator gates ---
    /// Blink after calibration (done / failed)
    pub signal_calibration_outcome: bool,
    /// Blink when association gives up at boot
    pub signal_association_failure: bool,
    /// Light the LED after each POST (delivered / failed)
    pub signal_report_outcome: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Door detection
            open_threshold_cm: 10.0,

            // Calibration
            calibration_samples: 5,
            calibration_interval_ms: 200,

            // Timing
            poll_interval_ms: 250,
            bad_reading_retry_ms: 80,

            // Network
            wifi_connect_attempts: 20,
            wifi_retry_interval_ms: 500,

            // Indicator gates
            signal_calibration_outcome: false,
            signal_association_failure: false,
            signal_report_outcome: false,
        }
    }
}

impl SystemConfig {
    /// Reject values that would make the monitor misbehave.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.open_threshold_cm.is_finite() || self.open_threshold_cm <= 0.0 {
            return Err(Error::Config("open_threshold_cm must be a positive number"));
        }
        if self.calibration_samples == 0 {
            return Err(Error::Config("calibration_samples must be at least 1"));
        }
        if self.wifi_connect_attempts == 0 {
            return Err(Error::Config("wifi_connect_attempts must be at least 1"));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be non-zero"));
        }
        Ok(())
    }
}

/// WiFi station credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub ssid: heapless::String<32>,
    pub password: heapless::String<64>,
}

impl NetworkConfig {
    /// Build from borrowed strings; fails if either exceeds the WiFi limits.
    pub fn new(ssid: &str, password: &str) -> Result<Self, Error> {
        let mut cfg = Self::default();
        cfg.ssid
            .push_str(ssid)
            .map_err(|()| Error::Config("SSID longer than 32 bytes"))?;
        cfg.password
            .push_str(password)
            .map_err(|()| Error::Config("password longer than 64 bytes"))?;
        Ok(cfg)
    }
}

/// Remote endpoint the door events are POSTed to.
#[derive(Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Scheme + host, without a trailing slash (e.g. `https://xyz.supabase.co`)
    pub base_url: String,
    /// Resource path appended to `base_url`
    pub resource_path: String,
    /// Static key sent both as `apikey` and as the bearer token
    pub api_key: String,
    /// HTTP client timeout (milliseconds)
    pub timeout_ms: u32,
}

impl ReporterConfig {
    pub const DEFAULT_RESOURCE_PATH: &'static str = "/rest/v1/door_events";

    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            resource_path: Self::DEFAULT_RESOURCE_PATH.to_string(),
            api_key: api_key.to_string(),
            timeout_ms: 10_000,
        }
    }

    /// Full request URL.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.resource_path)
    }
}

// The key is a credential; keep it out of debug logs.
impl core::fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReporterConfig")
            .field("base_url", &self.base_url)
            .field("resource_path", &self.resource_path)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
