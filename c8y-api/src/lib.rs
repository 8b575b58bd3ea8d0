//! c8y API - generic REST access layer for the c8y device-management platform.
//!
//! Every resource call goes through the same three steps: a
//! [`request::RequestBuilder`] assembles the request from a
//! [`request::CallDescription`], a [`transport::Transport`] sends it, and
//! [`response::classify`] maps the raw response to a success value or one
//! [`c8y_core::C8yError`]. Collections are paged through
//! [`collection::CursorWalker`]; per-resource façades are instances of
//! [`resource::Resource`].

pub mod client;
pub mod collection;
pub mod endpoints;
pub mod request;
pub mod resource;
pub mod response;
pub mod transport;

// Re-export key types
pub use client::ApiClient;
pub use collection::{Collection, CursorWalker, PageSize, Statistics};
pub use request::{CallDescription, PreparedRequest, QueryParams, RequestBuilder};
pub use resource::{Resource, ResourceKind, ServerStatistics, StatisticsSource};
pub use response::{ErrorBody, Outcome};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
