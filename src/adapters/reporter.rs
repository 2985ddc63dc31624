//! HTTP reporter adapter.
//!
//! Implements [`ReportPort`] by POSTing a [`ReportRequest`] to the
//! configured endpoint. One connection per event; the response body is
//! not read (`Prefer: return=minimal` makes it empty anyway).
//!
//! - **`target_os = "espidf"`**: `EspHttpConnection` wrapped in the
//!   `embedded-svc` blocking client, TLS via the IDF certificate bundle,
//!   timeout from [`ReporterConfig::timeout_ms`].
//! - **all other targets**: logs the request and answers `201 Created`,
//!   or a status/failure forced by the simulation hooks.

use log::info;

use crate::app::ports::ReportPort;
use crate::app::report::ReportRequest;
use crate::config::ReporterConfig;
use crate::door::DoorEvent;
use crate::error::CommsError;

pub struct HttpReporter {
    config: ReporterConfig,
    #[cfg(not(target_os = "espidf"))]
    sim_response: Result<u16, CommsError>,
    #[cfg(not(target_os = "espidf"))]
    sim_sent: Vec<ReportRequest>,
}

impl HttpReporter {
    pub fn new(config: ReporterConfig) -> Self {
        info!("Reporter: endpoint {}", config.endpoint());
        Self {
            config,
            #[cfg(not(target_os = "espidf"))]
            sim_response: Ok(201),
            #[cfg(not(target_os = "espidf"))]
            sim_sent: Vec::new(),
        }
    }

    /// Simulation: what the fake server answers from now on.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_respond_with(&mut self, response: Result<u16, CommsError>) {
        self.sim_response = response;
    }

    /// Simulation: every request "sent" so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_sent(&self) -> &[ReportRequest] {
        &self.sim_sent
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn send(&mut self, request: &ReportRequest) -> Result<u16, CommsError> {
        use core::time::Duration;
        use embedded_svc::http::Status;
        use embedded_svc::http::client::Client;
        use embedded_svc::io::Write;
        use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

        let http_conf = Configuration {
            timeout: Some(Duration::from_millis(u64::from(self.config.timeout_ms))),
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        };

        let fail = |stage: &str, e: &dyn core::fmt::Debug| {
            log::warn!("Reporter: {} failed: {:?}", stage, e);
            CommsError::HttpRequestFailed
        };

        let conn = EspHttpConnection::new(&http_conf).map_err(|e| fail("connection", &e))?;
        let mut client = Client::wrap(conn);

        let content_length = request.body.len().to_string();
        let mut headers: Vec<(&str, &str)> = request.header_pairs().collect();
        headers.push(("Content-Length", content_length.as_str()));

        let mut req = client
            .post(&request.url, &headers)
            .map_err(|e| fail("request", &e))?;
        req.write_all(&request.body).map_err(|e| fail("write", &e))?;
        req.flush().map_err(|e| fail("flush", &e))?;
        let response = req.submit().map_err(|e| fail("submit", &e))?;
        Ok(response.status())
    }

    #[cfg(not(target_os = "espidf"))]
    fn send(&mut self, request: &ReportRequest) -> Result<u16, CommsError> {
        info!(
            "Reporter(sim): POST {} {}",
            request.url,
            String::from_utf8_lossy(&request.body)
        );
        self.sim_sent.push(request.clone());
        self.sim_response
    }
}

impl ReportPort for HttpReporter {
    fn post(&mut self, event: DoorEvent) -> Result<u16, CommsError> {
        let request = ReportRequest::new(&self.config, event).map_err(|e| {
            log::error!("Reporter: cannot encode {}: {}", event, e);
            CommsError::HttpRequestFailed
        })?;
        self.send(&request)
    }
}
