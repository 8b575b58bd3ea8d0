//! c8y Models - resource payloads and typed query filters.
//!
//! One module per platform resource. Payloads are plain serde structs in
//! the platform's camelCase JSON shape; unknown fragments on managed
//! objects, events and operations are kept in a flattened map so that a
//! read-modify-write cycle never drops data.

pub mod filter;
pub mod models;

// Re-export key types
pub use filter::{EventFilter, ManagedObjectFilter, OperationFilter, QueryFilter, UserFilter};
pub use models::bulk_operation::{BulkOperation, BulkOperationProgress, BulkOperationStatus};
pub use models::device_credentials::DeviceCredentials;
pub use models::device_request::{NewDeviceRequest, NewDeviceRequestStatus};
pub use models::event::Event;
pub use models::managed_object::{ManagedObject, ManagedObjectReference, SourceRef};
pub use models::operation::{Operation, OperationStatus};
pub use models::user::{Group, Role, User};
