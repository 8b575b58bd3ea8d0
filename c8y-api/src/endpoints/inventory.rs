//! Inventory endpoints: managed objects and their child references.

use c8y_core::error::C8yResult;
use c8y_models::{ManagedObject, ManagedObjectReference};

use crate::request::CallDescription;
use crate::resource::{Resource, ResourceKind};

/// `/inventory/managedObjects`
#[derive(Debug, Clone, Copy)]
pub struct ManagedObjects;

impl ResourceKind for ManagedObjects {
    type Item = ManagedObject;

    const NAME: &'static str = "managed object";
    const PLURAL: &'static str = "managed objects";
    const ITEMS_KEY: &'static str = "managedObjects";
    const MEDIA_TYPE: &'static str = "managedObject";
    const COLLECTION_MEDIA_TYPE: &'static str = "managedObjectCollection";
}

/// `/inventory/managedObjects/{id}/childDevices` and its asset and addition siblings.
#[derive(Debug, Clone, Copy)]
pub struct ManagedObjectReferences;

impl ResourceKind for ManagedObjectReferences {
    type Item = ManagedObjectReference;

    const NAME: &'static str = "managed object reference";
    const PLURAL: &'static str = "managed object references";
    const ITEMS_KEY: &'static str = "references";
    const MEDIA_TYPE: &'static str = "managedObjectReference";
    const COLLECTION_MEDIA_TYPE: &'static str = "managedObjectReferenceCollection";
}

impl Resource<ManagedObjectReferences> {
    /// Link an existing managed object as a child.
    ///
    /// The platform may answer 201 with or without a body; both are success.
    pub fn add(&self, child_id: &str) -> C8yResult<()> {
        let operation = "add managed object reference";
        self.item_path(operation, child_id)?;

        let media = self.item_media_type();
        let call = CallDescription::post(operation, self.base_path())
            .content_type(&media)
            .allow_empty_body()
            .json_body(&ManagedObjectReference::to(child_id))?;
        self.client().send(&call).map(|_| ())
    }

    /// Unlink a child. The child itself is not deleted.
    pub fn remove(&self, child_id: &str) -> C8yResult<()> {
        self.delete(child_id)
    }
}
