//! HTTP transport — reqwest client against the assistant backend.

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use super::{Backend, RequestKind};
use crate::config::ClientConfig;
use crate::error::{ConfigError, TransportError};

/// Talks to the backend over plain HTTP/JSON. No auth, no retries.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, kind: RequestKind) -> Result<Url, TransportError> {
        self.base_url
            .join(kind.path())
            .map_err(|e| TransportError::new(kind, format!("bad endpoint URL: {e}")))
    }
}

#[async_trait]
impl Backend for HttpTransport {
    async fn request(
        &self,
        kind: RequestKind,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        let url = self.endpoint(kind)?;
        debug!(kind = %kind, url = %url, "Sending backend request");

        let mut builder = self.client.request(kind.method(), url);
        if let Some(body) = payload {
            builder = builder.json(&body);
        }

        let resp = builder.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                format!("timed out: {e}")
            } else {
                e.to_string()
            };
            TransportError::new(kind, reason)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::new(
                kind,
                format!("HTTP {status}: {}", body.chars().take(200).collect::<String>()),
            ));
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| TransportError::new(kind, format!("invalid JSON body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_onto_origin() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:9000")
            .unwrap();
        let transport = HttpTransport::new(&config).unwrap();

        assert_eq!(
            transport.endpoint(RequestKind::Chat).unwrap().as_str(),
            "http://localhost:9000/chat/"
        );
        assert_eq!(
            transport.endpoint(RequestKind::CalendarEvents).unwrap().as_str(),
            "http://localhost:9000/calendar/events/"
        );
        assert_eq!(
            transport.endpoint(RequestKind::Health).unwrap().as_str(),
            "http://localhost:9000/"
        );
    }

    #[test]
    fn endpoints_keep_base_path() {
        for base in ["http://localhost:9000/api", "http://localhost:9000/api/"] {
            let config = ClientConfig::default().with_base_url(base).unwrap();
            let transport = HttpTransport::new(&config).unwrap();

            assert_eq!(
                transport.endpoint(RequestKind::Chat).unwrap().as_str(),
                "http://localhost:9000/api/chat/"
            );
            assert_eq!(
                transport.endpoint(RequestKind::ProductivityInsights).unwrap().as_str(),
                "http://localhost:9000/api/productivity_insights/"
            );
            assert_eq!(
                transport.endpoint(RequestKind::Health).unwrap().as_str(),
                "http://localhost:9000/api/"
            );
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Port 9 (discard) on loopback is essentially never listening.
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .unwrap();
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport
            .request(RequestKind::DayPlan, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, RequestKind::DayPlan);
    }
}
