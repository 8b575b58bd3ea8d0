//! Resource model definitions.

pub mod bulk_operation;
pub mod device_credentials;
pub mod device_request;
pub mod event;
pub mod managed_object;
pub mod operation;
pub mod user;
