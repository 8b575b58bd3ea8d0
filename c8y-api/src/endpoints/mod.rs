//! Resource kinds and resource-specific helpers, one module per platform area.
//!
//! Each kind plugs a payload type, items key and media types into the
//! generic [`crate::resource::Resource`] façade.

pub mod device_credentials;
pub mod device_requests;
pub mod events;
pub mod inventory;
pub mod operations;
pub mod users;

pub use device_credentials::DeviceCredentialsKind;
pub use device_requests::NewDeviceRequests;
pub use events::Events;
pub use inventory::{ManagedObjectReferences, ManagedObjects};
pub use operations::{BulkOperations, Operations};
pub use users::{Groups, Roles, Users};
