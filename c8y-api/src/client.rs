//! HTTP client for the platform REST API.
//!
//! Holds only immutable configuration (base URL, credentials, media-type
//! vendor) and a shared [`Transport`]. Every call is one request builder,
//! transport and classifier round trip; nothing is retried or cached here.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use c8y_core::config::{AppConfig, Credentials, PlatformConfig};
use c8y_core::constants::{self, paths};
use c8y_core::error::{C8yError, C8yResult};

use crate::collection::CursorWalker;
use crate::endpoints::{
    BulkOperations, DeviceCredentialsKind, Events, Groups, ManagedObjectReferences,
    ManagedObjects, NewDeviceRequests, Operations, Roles, Users,
};
use crate::request::{id_segment, AuthHeader, CallDescription, RequestBuilder};
use crate::resource::Resource;
use crate::response::{self, Outcome};
use crate::transport::{ReqwestTransport, Transport};

/// Client for the platform REST API.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    credentials: Credentials,
    auth: AuthHeader,
    vendor: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client using the reqwest transport configured from `config`.
    pub fn new(config: &PlatformConfig) -> C8yResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a caller-supplied transport.
    ///
    /// Fails only if the base URL is missing or malformed.
    pub fn with_transport(config: &PlatformConfig, transport: Arc<dyn Transport>) -> C8yResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let credentials = config.credentials();
        let vendor = if config.vendor.is_empty() {
            constants::DEFAULT_MEDIA_VENDOR.to_string()
        } else {
            config.vendor.clone()
        };

        debug!("client created for {base_url} as {}", credentials.auth_user());
        Ok(Self {
            base_url,
            auth: AuthHeader::new(&credentials),
            credentials,
            vendor,
            transport,
        })
    }

    /// The platform base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured tenant, if any.
    pub fn tenant(&self) -> Option<&str> {
        self.credentials.tenant.as_deref()
    }

    /// `application/vnd.<vendor>.<resource>+json`
    pub fn media_type(&self, resource: &str) -> String {
        format!("application/vnd.{}.{resource}+json", self.vendor)
    }

    /// Request builder bound to this client's base URL and credentials.
    pub fn request_builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.base_url, &self.auth)
    }

    /// Build, send and classify one call.
    pub fn send(&self, call: &CallDescription) -> C8yResult<Outcome> {
        let request = self.request_builder().build(call);
        debug!("{} {} ({})", request.method, request.url.path(), call.operation);

        let raw = self.transport.execute(&request).map_err(|e| {
            C8yError::client(&call.operation, format!("request failed: {e}"))
        })?;
        response::classify(call, raw)
    }

    /// Send a call that must return a body and decode it as `T`.
    pub fn fetch<T: DeserializeOwned>(&self, call: &CallDescription) -> C8yResult<T> {
        let body = self.send(call)?.into_body(&call.operation)?;
        response::decode(&call.operation, &body)
    }

    /// A cursor walker for one collection resource.
    pub fn walker(&self, operation: &str, items_key: &str, accept: &str) -> CursorWalker<'_> {
        CursorWalker::new(self, operation, items_key, accept)
    }

    // --- Resource façades ---

    /// Device registration requests.
    pub fn device_requests(&self) -> Resource<NewDeviceRequests> {
        Resource::new(self.clone(), paths::NEW_DEVICE_REQUESTS)
    }

    /// Device credentials (requested by devices with bootstrap credentials).
    pub fn device_credentials(&self) -> Resource<DeviceCredentialsKind> {
        Resource::new(self.clone(), paths::DEVICE_CREDENTIALS)
    }

    pub fn managed_objects(&self) -> Resource<ManagedObjects> {
        Resource::new(self.clone(), paths::MANAGED_OBJECTS)
    }

    /// Child devices of `parent_id`. A blank parent id is rejected.
    pub fn child_devices(&self, parent_id: &str) -> C8yResult<Resource<ManagedObjectReferences>> {
        self.references(parent_id, "childDevices")
    }

    /// Child assets of `parent_id`. A blank parent id is rejected.
    pub fn child_assets(&self, parent_id: &str) -> C8yResult<Resource<ManagedObjectReferences>> {
        self.references(parent_id, "childAssets")
    }

    /// Child additions of `parent_id`. A blank parent id is rejected.
    pub fn child_additions(&self, parent_id: &str) -> C8yResult<Resource<ManagedObjectReferences>> {
        self.references(parent_id, "childAdditions")
    }

    fn references(&self, parent_id: &str, kind: &str) -> C8yResult<Resource<ManagedObjectReferences>> {
        let parent = id_segment(&format!("select {kind}"), parent_id)?;
        let path = format!("{}/{parent}/{kind}", paths::MANAGED_OBJECTS);
        Ok(Resource::new(self.clone(), path))
    }

    pub fn operations(&self) -> Resource<Operations> {
        Resource::new(self.clone(), paths::OPERATIONS)
    }

    pub fn bulk_operations(&self) -> Resource<BulkOperations> {
        Resource::new(self.clone(), paths::BULK_OPERATIONS)
    }

    pub fn events(&self) -> Resource<Events> {
        Resource::new(self.clone(), paths::EVENTS)
    }

    /// Users of `tenant`. A blank tenant is rejected.
    pub fn users(&self, tenant: &str) -> C8yResult<Resource<Users>> {
        let tenant = id_segment("select tenant users", tenant)?;
        Ok(Resource::new(self.clone(), paths::users(&tenant)))
    }

    pub fn roles(&self) -> Resource<Roles> {
        Resource::new(self.clone(), paths::ROLES)
    }

    /// User groups of `tenant`. A blank tenant is rejected.
    pub fn groups(&self, tenant: &str) -> C8yResult<Resource<Groups>> {
        let tenant = id_segment("select tenant groups", tenant)?;
        Ok(Resource::new(self.clone(), paths::groups(&tenant)))
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("vendor", &self.vendor)
            .finish_non_exhaustive()
    }
}

/// Parse and validate the configured base URL.
fn parse_base_url(raw: &str) -> C8yResult<Url> {
    let sanitized = AppConfig::sanitize_base_url(raw);
    if sanitized.is_empty() {
        return Err(C8yError::Config("platform base URL is not configured".into()));
    }
    let url = Url::parse(&sanitized)
        .map_err(|e| C8yError::Config(format!("invalid base URL '{sanitized}': {e}")))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(C8yError::Config(format!("base URL '{sanitized}' has no host")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PreparedRequest;
    use crate::transport::{RawResponse, TransportError};

    #[derive(Debug)]
    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, _request: &PreparedRequest) -> Result<RawResponse, TransportError> {
            Err(TransportError("connection refused".into()))
        }
    }

    fn config(base_url: &str) -> PlatformConfig {
        PlatformConfig {
            base_url: base_url.into(),
            tenant: "t1".into(),
            username: "admin".into(),
            password: "pw".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_url_validation() {
        assert!(ApiClient::with_transport(&config("t1.example.com/"), Arc::new(Unreachable)).is_ok());

        for bad in ["", "   ", "http://", "https://exa mple.com"] {
            let err = ApiClient::with_transport(&config(bad), Arc::new(Unreachable)).unwrap_err();
            assert_eq!(err.kind(), c8y_core::ErrorKind::Configuration, "{bad:?}");
        }
    }

    #[test]
    fn test_media_type_uses_vendor() {
        let mut cfg = config("https://t1.example.com");
        let client = ApiClient::with_transport(&cfg, Arc::new(Unreachable)).unwrap();
        assert_eq!(
            client.media_type("managedObject"),
            "application/vnd.com.nsn.cumulocity.managedObject+json"
        );

        cfg.vendor = "x".into();
        let client = ApiClient::with_transport(&cfg, Arc::new(Unreachable)).unwrap();
        assert_eq!(client.media_type("event"), "application/vnd.x.event+json");
    }

    #[test]
    fn test_transport_failure_is_client_error() {
        let client = ApiClient::with_transport(&config("https://t1.example.com"), Arc::new(Unreachable)).unwrap();
        let err = client
            .send(&CallDescription::get("get event", "/event/events/1"))
            .unwrap_err();
        assert_eq!(err.kind(), c8y_core::ErrorKind::ClientError);
        assert!(err.to_string().contains("connection refused"), "{err}");
    }

    #[test]
    fn test_parent_and_tenant_paths() {
        let client = ApiClient::with_transport(&config("https://t1.example.com"), Arc::new(Unreachable)).unwrap();
        assert_eq!(
            client.child_additions("10").unwrap().base_path(),
            "/inventory/managedObjects/10/childAdditions"
        );
        assert_eq!(client.users("t 1").unwrap().base_path(), "/user/t%201/users");
        assert_eq!(client.groups("t1").unwrap().base_path(), "/user/t1/groups");
    }

    #[test]
    fn test_debug_hides_password() {
        let client = ApiClient::with_transport(&config("https://t1.example.com"), Arc::new(Unreachable)).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("t1.example.com"));
        assert!(!debug.contains("pw\""));
    }
}
