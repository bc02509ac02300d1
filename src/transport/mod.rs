//! Transport adapter — the single seam between the client core and the backend.
//!
//! Every exchange is one request/response returning JSON. Failures of any
//! sort (network, status, body) come back as a [`TransportError`] tagged with
//! the [`RequestKind`]; nothing panics or escapes across this boundary.

pub mod http;
pub mod wire;

pub use http::HttpTransport;

use std::fmt;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// The fixed set of backend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Chat,
    CalendarEvents,
    DayPlan,
    ProductivityInsights,
    /// Backend welcome probe. Not one of the dispatcher's actions.
    Health,
}

impl RequestKind {
    /// Endpoint path relative to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Chat => "chat/",
            Self::CalendarEvents => "calendar/events/",
            Self::DayPlan => "day_plan/",
            Self::ProductivityInsights => "productivity_insights/",
            Self::Health => "./",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Chat => Method::POST,
            _ => Method::GET,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::CalendarEvents => "calendar_events",
            Self::DayPlan => "day_plan",
            Self::ProductivityInsights => "productivity_insights",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can carry a request to the assistant backend.
///
/// `HttpTransport` is the production implementation; tests substitute stubs.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Issue one request and wait for it to settle.
    async fn request(
        &self,
        kind: RequestKind,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError>;

    /// Probe the backend root and return its welcome message.
    async fn health_check(&self) -> Result<String, TransportError> {
        let body = self.request(RequestKind::Health, None).await?;
        let welcome: wire::WelcomeResponse = decode(RequestKind::Health, body)?;
        Ok(welcome.message)
    }
}

/// Decode a JSON body into the expected response shape.
///
/// A body that doesn't match is a transport failure like any other.
pub fn decode<T: DeserializeOwned>(
    kind: RequestKind,
    body: serde_json::Value,
) -> Result<T, TransportError> {
    serde_json::from_value(body)
        .map_err(|e| TransportError::new(kind, format!("unexpected response shape: {e}")))
}
