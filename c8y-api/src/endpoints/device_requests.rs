//! Device registration request endpoints.

use serde_json::json;

use c8y_core::error::C8yResult;
use c8y_models::{NewDeviceRequest, NewDeviceRequestStatus};

use crate::resource::{Resource, ResourceKind};

/// `/devicecontrol/newDeviceRequests`
#[derive(Debug, Clone, Copy)]
pub struct NewDeviceRequests;

impl ResourceKind for NewDeviceRequests {
    type Item = NewDeviceRequest;

    const NAME: &'static str = "new device request";
    const PLURAL: &'static str = "new device requests";
    const ITEMS_KEY: &'static str = "newDeviceRequests";
    const MEDIA_TYPE: &'static str = "newDeviceRequest";
    const COLLECTION_MEDIA_TYPE: &'static str = "newDeviceRequestCollection";
}

impl Resource<NewDeviceRequests> {
    /// Register a device id, creating a request in `WAITING_FOR_CONNECTION`.
    pub fn register(&self, device_id: &str) -> C8yResult<NewDeviceRequest> {
        self.create(&NewDeviceRequest::new(device_id))
    }

    /// Accept a request that is pending acceptance.
    pub fn accept(&self, device_id: &str) -> C8yResult<NewDeviceRequest> {
        self.update_with(device_id, &json!({ "status": NewDeviceRequestStatus::Accepted }))
    }
}
