//! c8y Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other c8y crates:
//! - Client configuration (base URL, tenant, credentials, transport settings)
//! - The error taxonomy returned by every request round trip
//! - Structured logging with tracing
//! - Common constants (page-size bounds, resource paths)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, Credentials, PlatformConfig};
pub use error::{C8yError, C8yResult, ErrorKind};
pub use logging::init_logging;
