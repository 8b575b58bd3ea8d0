//! HTTP transport seam.
//!
//! The access layer never talks to the network directly: it hands a fully
//! prepared request to a [`Transport`] and gets back status, headers and raw
//! bytes. Connection pooling, TLS and timeouts belong to the transport.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use tracing::debug;

use c8y_core::config::PlatformConfig;
use c8y_core::error::{C8yError, C8yResult};

use crate::request::PreparedRequest;

/// A failure below HTTP: DNS, connect, TLS, timeout, broken body stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Status, headers and body of one exchange. Consumed by the classifier
/// straight away.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Case-insensitive multimap.
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header; invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }
}

/// Performs one blocking request/response exchange.
///
/// Implementations must be safe to share between threads; the client calls
/// `execute` concurrently from whichever threads its callers use.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Build the transport from platform configuration (timeout, TLS leniency).
    ///
    /// Must not be called from within an async runtime.
    pub fn new(config: &PlatformConfig) -> C8yResult<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_secs(15))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                c8y_core::constants::APP_NAME,
                c8y_core::constants::APP_VERSION
            ));

        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| C8yError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { inner })
    }

    /// Wrap an already configured client.
    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .inner
            .request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(classify_error)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(|e| TransportError(format!("failed to read response body: {e}")))?
            .to_vec();

        debug!("{} {} -> {} ({} bytes)", request.method, request.url.path(), status, body.len());
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Classify a reqwest error into a TransportError message.
fn classify_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError(format!("request timed out: {e}"))
    } else if e.is_connect() {
        TransportError(format!("connection failed: {e}"))
    } else {
        TransportError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_headers_case_insensitive() {
        let raw = RawResponse::new(200, "{}")
            .with_header("Content-Type", "application/json")
            .with_header("X-Multi", "a")
            .with_header("x-multi", "b");
        assert_eq!(raw.headers["content-type"], "application/json");
        assert_eq!(raw.headers.get_all("X-MULTI").iter().count(), 2);
    }

    #[test]
    fn test_transport_builds_from_config() {
        let config = PlatformConfig {
            accept_invalid_certs: true,
            ..Default::default()
        };
        assert!(ReqwestTransport::new(&config).is_ok());
    }
}
