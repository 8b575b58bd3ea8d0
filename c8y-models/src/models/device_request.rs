//! Device registration request model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a device registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewDeviceRequestStatus {
    /// Registered, waiting for the device to connect for the first time.
    WaitingForConnection,
    /// The device connected and awaits an operator decision.
    PendingAcceptance,
    /// Accepted; the device may now fetch its credentials.
    Accepted,
    Blocked,
}

/// A device registration request.
///
/// Created by an operator with only `id` (the device's external serial);
/// the platform fills in the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NewDeviceRequestStatus>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

impl NewDeviceRequest {
    /// A registration payload for the given device id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: None,
            self_url: None,
            owner: None,
            tenant_id: None,
            creation_time: None,
        }
    }

    /// An update payload moving the request to `status`.
    pub fn with_status(mut self, status: NewDeviceRequestStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pending() {
        let json = r#"{"id":"4711","status":"PENDING_ACCEPTANCE"}"#;
        let req: NewDeviceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, "4711");
        assert_eq!(req.status, Some(NewDeviceRequestStatus::PendingAcceptance));
    }

    #[test]
    fn test_create_payload_is_minimal() {
        let json = serde_json::to_value(NewDeviceRequest::new("4711")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "4711"}));
    }

    #[test]
    fn test_accept_payload() {
        let json = serde_json::to_value(
            NewDeviceRequest::new("4711").with_status(NewDeviceRequestStatus::Accepted),
        )
        .unwrap();
        assert_eq!(json["status"], "ACCEPTED");
    }
}
