//! Device control endpoints: operations and bulk operations.

use c8y_core::error::C8yResult;
use c8y_models::{BulkOperation, Operation, OperationStatus};

use crate::resource::{Resource, ResourceKind};

/// `/devicecontrol/operations`
#[derive(Debug, Clone, Copy)]
pub struct Operations;

impl ResourceKind for Operations {
    type Item = Operation;

    const NAME: &'static str = "operation";
    const PLURAL: &'static str = "operations";
    const ITEMS_KEY: &'static str = "operations";
    const MEDIA_TYPE: &'static str = "operation";
    const COLLECTION_MEDIA_TYPE: &'static str = "operationCollection";
}

impl Resource<Operations> {
    /// Move an operation to `status`, recording `failure_reason` for FAILED.
    pub fn set_status(
        &self,
        id: &str,
        status: OperationStatus,
        failure_reason: Option<&str>,
    ) -> C8yResult<Operation> {
        let mut payload = Operation::status_update(status);
        payload.failure_reason = failure_reason.map(str::to_string);
        self.update_with(id, &payload)
    }
}

/// `/devicecontrol/bulkoperations`
#[derive(Debug, Clone, Copy)]
pub struct BulkOperations;

impl ResourceKind for BulkOperations {
    type Item = BulkOperation;

    const NAME: &'static str = "bulk operation";
    const PLURAL: &'static str = "bulk operations";
    const ITEMS_KEY: &'static str = "bulkOperations";
    const MEDIA_TYPE: &'static str = "bulkOperation";
    const COLLECTION_MEDIA_TYPE: &'static str = "bulkOperationCollection";
}
