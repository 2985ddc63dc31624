//! Door-event wire format.
//!
//! One event is one `POST <base_url>/rest/v1/door_events` carrying
//! `{"event_type":"opened"}` or `{"event_type":"closed"}`. The endpoint is
//! a PostgREST table, so the key goes out twice (`apikey` and bearer
//! token) and `Prefer: return=minimal` asks for an empty response.
//!
//! [`ReportRequest::new`] is pure so the exact request can be checked on
//! the host; the HTTP adapter only has to send it.

use serde::Serialize;

use crate::config::ReporterConfig;
use crate::door::DoorEvent;
use crate::error::CommsError;

/// JSON body of a door event.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DoorEventPayload {
    pub event_type: DoorEvent,
}

/// A fully built request, ready for the HTTP client.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl ReportRequest {
    pub fn new(config: &ReporterConfig, event: DoorEvent) -> serde_json::Result<Self> {
        let body = serde_json::to_vec(&DoorEventPayload { event_type: event })?;
        Ok(Self {
            url: config.endpoint(),
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("apikey", config.api_key.clone()),
                ("Authorization", format!("Bearer {}", config.api_key)),
                ("Prefer", "return=minimal".to_string()),
            ],
            body,
        })
    }

    /// Headers as borrowed pairs, the shape HTTP client APIs take.
    pub fn header_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_pairs()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

/// `201 Created` is what PostgREST answers; `200` is accepted too.
pub fn is_success(status: u16) -> bool {
    matches!(status, 200 | 201)
}

/// What happened to one delivery attempt. Nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Server accepted the event.
    Delivered(u16),
    /// Server answered with a non-success status.
    Rejected(u16),
    /// The request never got a response.
    TransportFailed(CommsError),
    /// WiFi was down; no request was made and the event is lost.
    NetworkDown,
}

impl ReportOutcome {
    pub fn from_status(result: Result<u16, CommsError>) -> Self {
        match result {
            Ok(status) if is_success(status) => Self::Delivered(status),
            Ok(status) => Self::Rejected(status),
            Err(e) => Self::TransportFailed(e),
        }
    }

    pub fn delivered(self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}
