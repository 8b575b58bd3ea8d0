//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use c8y_api::{ApiClient, PreparedRequest, RawResponse, Transport, TransportError};
use c8y_core::config::PlatformConfig;

/// Transport that replays queued responses and records every request.
///
/// Running out of responses is reported as a transport failure.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response with the given status and body.
    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request.
    pub fn last(&self) -> PreparedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError("no scripted response left".into()))
    }
}

/// Platform configuration for tenant `t1`, user `admin`, vendor `x`.
pub fn test_config(base_url: &str) -> PlatformConfig {
    PlatformConfig {
        base_url: base_url.into(),
        tenant: "t1".into(),
        username: "admin".into(),
        password: "secret".into(),
        vendor: "x".into(),
        ..Default::default()
    }
}

/// Client on `https://t1.example.com` backed by `transport`.
pub fn test_client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::with_transport(&test_config("https://t1.example.com"), transport.clone())
        .expect("failed to create test client")
}

/// `Basic base64("t1/admin:secret")`
pub const AUTH: &str = "Basic dDEvYWRtaW46c2VjcmV0";
