//! Device credentials model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials handed to a device once its registration was accepted.
///
/// Requested by posting `{"id": "<device id>"}` with bootstrap credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCredentials {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

impl DeviceCredentials {
    /// A credentials request for the given device id.
    pub fn request(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tenant_id: None,
            username: None,
            password: None,
            self_url: None,
        }
    }
}

impl fmt::Debug for DeviceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCredentials")
            .field("id", &self.id)
            .field("tenant_id", &self.tenant_id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
