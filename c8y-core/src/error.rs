//! Error taxonomy for the c8y client.
//!
//! Every request round trip ends in either a success value or exactly one
//! domain error: [`C8yError::BadCredentials`], [`C8yError::AccessDenied`],
//! [`C8yError::Client`] or [`C8yError::ServerReported`]. The remaining
//! variants only come out of configuration handling and never from a request.

use thiserror::Error;

/// Convenience type alias for Results using C8yError.
pub type C8yResult<T> = Result<T, C8yError>;

/// Fieldless discriminant of [`C8yError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The platform answered 401.
    BadCredentials,
    /// The platform answered 403.
    AccessDenied,
    /// The client could not form, send or interpret the request.
    ClientError,
    /// The platform rejected the request with a structured error body.
    ServerReportedError,
    /// Fatal configuration problem (bad base URL, unreadable config file).
    Configuration,
}

/// Unified error type for the c8y client.
#[derive(Error, Debug)]
pub enum C8yError {
    // -- Domain errors --
    /// The platform rejected the credentials (HTTP 401).
    #[error("{operation}: bad credentials")]
    BadCredentials {
        /// Operation that was being performed.
        operation: String,
    },

    /// The credentials are valid but lack permission (HTTP 403).
    #[error("{operation}: access denied")]
    AccessDenied {
        /// Operation that was being performed.
        operation: String,
    },

    /// Local failure: validation, (de)serialization, transport or an
    /// unparsable error body.
    #[error("{operation}: {message}")]
    Client {
        /// Operation that was being performed.
        operation: String,
        /// What went wrong.
        message: String,
    },

    /// The platform returned a non-success status with a structured body.
    #[error("{operation}: server returned {status} ({error_type}): {message}")]
    ServerReported {
        /// Operation that was being performed.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Upstream error identifier, e.g. `inventory/Not Found`.
        error_type: String,
        /// Upstream message.
        message: String,
        /// Upstream documentation link.
        info: String,
    },

    // -- Configuration errors --
    /// Failed to load, parse or validate configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Config file system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl C8yError {
    /// Build a [`C8yError::Client`] for the given operation.
    pub fn client(operation: impl Into<String>, message: impl Into<String>) -> Self {
        C8yError::Client {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            C8yError::BadCredentials { .. } => ErrorKind::BadCredentials,
            C8yError::AccessDenied { .. } => ErrorKind::AccessDenied,
            C8yError::Client { .. } => ErrorKind::ClientError,
            C8yError::ServerReported { .. } => ErrorKind::ServerReportedError,
            C8yError::Config(_) | C8yError::Io(_) => ErrorKind::Configuration,
        }
    }

    /// Label of the operation that failed, if this is a domain error.
    pub fn operation(&self) -> Option<&str> {
        match self {
            C8yError::BadCredentials { operation }
            | C8yError::AccessDenied { operation }
            | C8yError::Client { operation, .. }
            | C8yError::ServerReported { operation, .. } => Some(operation),
            C8yError::Config(_) | C8yError::Io(_) => None,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            C8yError::BadCredentials { .. } => Some(401),
            C8yError::AccessDenied { .. } => Some(403),
            C8yError::ServerReported { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for C8yError {
    fn from(e: toml::de::Error) -> Self {
        C8yError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for C8yError {
    fn from(e: toml::ser::Error) -> Self {
        C8yError::Config(format!("failed to serialize config: {e}"))
    }
}
