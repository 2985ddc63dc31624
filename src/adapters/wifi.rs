//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`]: the hexagonal boundary for network
//! connectivity. Association is started once at boot with the credentials
//! from [`NetworkConfig`]; the monitor then polls
//! [`is_connected`](ConnectivityPort::is_connected) with its own attempt
//! budget.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `EspWifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! There is no reconnection policy beyond what ESP-IDF does on its own.
//! A dropped link simply makes the next report fail fast.

use log::info;

#[cfg(target_os = "espidf")]
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::EspWifi;

use crate::app::ports::{ConnectivityError, ConnectivityPort};
use crate::config::NetworkConfig;

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WifiState {
    Idle,
    Connecting,
    Failed,
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(ConnectivityError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    credentials: NetworkConfig,
    #[cfg(target_os = "espidf")]
    driver: EspWifi<'static>,
    /// Simulation: `is_connected` turns true once this many polls happened.
    #[cfg(not(target_os = "espidf"))]
    sim_polls_until_up: Option<u32>,
    #[cfg(not(target_os = "espidf"))]
    sim_polls: core::cell::Cell<u32>,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(driver: EspWifi<'static>, credentials: NetworkConfig) -> Self {
        Self {
            state: WifiState::Idle,
            credentials,
            driver,
        }
    }

    /// Simulated station that comes up immediately after `begin`.
    #[cfg(not(target_os = "espidf"))]
    pub fn new(credentials: NetworkConfig) -> Self {
        Self {
            state: WifiState::Idle,
            credentials,
            sim_polls_until_up: Some(0),
            sim_polls: core::cell::Cell::new(0),
        }
    }

    /// Simulation: come up after `polls` calls to `is_connected`, or never.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_up_after(mut self, polls: Option<u32>) -> Self {
        self.sim_polls_until_up = polls;
        self
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_begin(&mut self) -> Result<(), ConnectivityError> {
        let auth_method = if self.credentials.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self
                .credentials
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .credentials
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        let started = self
            .driver
            .set_configuration(&config)
            .and_then(|()| self.driver.start())
            .and_then(|()| self.driver.connect());
        started.map_err(|e| {
            log::warn!("WiFi: driver refused to start: {}", e);
            ConnectivityError::ConnectionFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_begin(&mut self) -> Result<(), ConnectivityError> {
        self.sim_polls.set(0);
        info!("WiFi(sim): associating with '{}'", self.credentials.ssid);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.driver.is_connected().unwrap_or(false)
            && self.driver.sta_netif().is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        let polls = self.sim_polls.get();
        self.sim_polls.set(polls.saturating_add(1));
        matches!(self.sim_polls_until_up, Some(n) if polls >= n)
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn begin(&mut self) -> Result<(), ConnectivityError> {
        if self.credentials.ssid.is_empty() {
            self.state = WifiState::Failed;
            return Err(ConnectivityError::NoCredentials);
        }
        let checked = validate_ssid(&self.credentials.ssid)
            .and_then(|()| validate_password(&self.credentials.password));
        if let Err(e) = checked {
            self.state = WifiState::Failed;
            return Err(e);
        }

        info!("WiFi: connecting to '{}'", self.credentials.ssid);
        match self.platform_begin() {
            Ok(()) => {
                self.state = WifiState::Connecting;
                Ok(())
            }
            Err(e) => {
                self.state = WifiState::Failed;
                Err(e)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.state == WifiState::Connecting && self.platform_is_connected()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
