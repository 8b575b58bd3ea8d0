//! Device credentials endpoint.
//!
//! A device polls this endpoint with bootstrap credentials until its
//! registration request is accepted. Until then the platform answers 404,
//! which [`Resource::<DeviceCredentialsKind>::poll`] reports as `None`.

use c8y_core::error::C8yResult;
use c8y_models::DeviceCredentials;

use crate::request::CallDescription;
use crate::resource::{Resource, ResourceKind};
use crate::response::{self, Outcome};

/// `/devicecontrol/deviceCredentials`
#[derive(Debug, Clone, Copy)]
pub struct DeviceCredentialsKind;

impl ResourceKind for DeviceCredentialsKind {
    type Item = DeviceCredentials;

    const NAME: &'static str = "device credentials";
    const PLURAL: &'static str = "device credentials";
    const ITEMS_KEY: &'static str = "deviceCredentials";
    const MEDIA_TYPE: &'static str = "deviceCredentials";
    const COLLECTION_MEDIA_TYPE: &'static str = "deviceCredentialsCollection";
}

impl Resource<DeviceCredentialsKind> {
    /// Request credentials for `device_id`; 404 is an error.
    pub fn request(&self, device_id: &str) -> C8yResult<DeviceCredentials> {
        self.create(&DeviceCredentials::request(device_id))
    }

    /// Request credentials for `device_id`; `Ok(None)` while the
    /// registration is not accepted yet.
    pub fn poll(&self, device_id: &str) -> C8yResult<Option<DeviceCredentials>> {
        let operation = "poll device credentials";
        self.item_path(operation, device_id)?;

        let media = self.item_media_type();
        let call = CallDescription::post(operation, self.base_path())
            .accept(&media)
            .content_type(&media)
            .absent_on_not_found()
            .json_body(&DeviceCredentials::request(device_id))?;

        match self.client().send(&call)? {
            Outcome::Absent => Ok(None),
            outcome => {
                let body = outcome.into_body(operation)?;
                response::decode(operation, &body).map(Some)
            }
        }
    }
}
