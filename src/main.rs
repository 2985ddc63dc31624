//! Doorsense firmware, main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter      WifiAdapter      HttpReporter      │
//! │  (Rangefinder+LED)    (Connectivity)   (Report)          │
//! │  LogEventSink                                            │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │          DoorMonitor (pure logic)                  │  │
//! │  │  calibration · door evaluator · report outcome     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Credentials and the endpoint are baked in at build time from the
//! `DOORSENSE_WIFI_SSID`, `DOORSENSE_WIFI_PASS`, `DOORSENSE_API_URL` and
//! `DOORSENSE_API_KEY` environment variables.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;

use doorsense::adapters::hardware::HardwareAdapter;
use doorsense::adapters::log_sink::LogEventSink;
use doorsense::adapters::reporter::HttpReporter;
use doorsense::adapters::wifi::WifiAdapter;
use doorsense::app::service::DoorMonitor;
use doorsense::config::{NetworkConfig, ReporterConfig, SystemConfig};
use doorsense::drivers::hw_init;

const WIFI_SSID: &str = match option_env!("DOORSENSE_WIFI_SSID") {
    Some(v) => v,
    None => "CHANGE_ME",
};
const WIFI_PASS: &str = match option_env!("DOORSENSE_WIFI_PASS") {
    Some(v) => v,
    None => "",
};
const API_URL: &str = match option_env!("DOORSENSE_API_URL") {
    Some(v) => v,
    None => "https://CHANGE_ME.supabase.co",
};
const API_KEY: &str = match option_env!("DOORSENSE_API_KEY") {
    Some(v) => v,
    None => "CHANGE_ME",
};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Doorsense v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    let network = NetworkConfig::new(WIFI_SSID, WIFI_PASS)?;
    let endpoint = ReporterConfig::new(API_URL, API_KEY);
    if WIFI_SSID == "CHANGE_ME" || API_KEY == "CHANGE_ME" {
        warn!("Built without credentials; reports will not reach a real endpoint");
    }

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Nothing useful can run without the rangefinder pins.
        log::error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 4. Adapters ───────────────────────────────────────────
    let mut wifi = WifiAdapter::new(EspWifi::new(peripherals.modem, sysloop, Some(nvs))?, network);
    let mut hw = HardwareAdapter::from_board_pins();
    let mut reporter = HttpReporter::new(endpoint);
    let mut log_sink = LogEventSink::new();

    // ── 5. Boot sequence, then the monitoring loop ────────────
    let mut monitor = DoorMonitor::new(config);
    monitor.start(&mut hw, &mut wifi, &mut log_sink);

    info!("System ready. Entering monitoring loop.");
    monitor.run(&mut hw, &wifi, &mut reporter, &mut log_sink)
}
