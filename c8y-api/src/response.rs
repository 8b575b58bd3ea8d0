//! Response classification and error mapping.
//!
//! The platform reports failures as
//! ```json
//! { "error": "inventory/Not Found", "message": "...", "info": "https://..." }
//! ```
//! but 401 and 403 bodies are not guaranteed to be structured, so those two
//! are classified from the status alone before any body parsing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use c8y_core::error::{C8yError, C8yResult};

use crate::request::CallDescription;
use crate::transport::RawResponse;

/// Structured error body returned by the platform.
///
/// Any of the fields may be missing; a body counts as structured when it
/// carries at least one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error type identifier, e.g. `security/Unauthorized`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ErrorBody {
    /// Parse `body`, failing when it is not a JSON object with at least one
    /// of `error`, `message` or `info`.
    pub fn parse(body: &[u8]) -> Result<Self, String> {
        let parsed: ErrorBody = serde_json::from_slice(body).map_err(|e| e.to_string())?;
        if parsed.error.is_none() && parsed.message.is_none() && parsed.info.is_none() {
            return Err("no error, message or info field".to_string());
        }
        Ok(parsed)
    }
}

/// Successful outcome of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Success status with a non-empty body.
    Body(Vec<u8>),
    /// Success status with an empty body, on a call that allows it.
    NoContent,
    /// 404 on a call that declares "absent" as a valid answer.
    Absent,
}

impl Outcome {
    /// The body, or a client error if the call produced none.
    pub fn into_body(self, operation: &str) -> C8yResult<Vec<u8>> {
        match self {
            Outcome::Body(body) => Ok(body),
            Outcome::NoContent | Outcome::Absent => {
                Err(C8yError::client(operation, "response body was empty"))
            }
        }
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(|b| b.is_ascii_whitespace())
}

/// Decide the outcome of `call` from its raw response.
///
/// Order: expected status, 401, 403, declared 404-absent, structured error
/// body, and finally a client error for anything unparsable.
pub fn classify(call: &CallDescription, raw: RawResponse) -> C8yResult<Outcome> {
    let operation = call.operation.as_str();

    if raw.status == call.expected_status {
        if is_blank(&raw.body) {
            return if call.allows_empty_body {
                Ok(Outcome::NoContent)
            } else {
                Err(C8yError::client(operation, "response body was empty"))
            };
        }
        return Ok(Outcome::Body(raw.body));
    }

    match raw.status {
        401 => {
            warn!("{operation}: platform rejected credentials");
            return Err(C8yError::BadCredentials {
                operation: operation.to_string(),
            });
        }
        403 => {
            warn!("{operation}: access denied");
            return Err(C8yError::AccessDenied {
                operation: operation.to_string(),
            });
        }
        404 if call.absent_on_not_found => return Ok(Outcome::Absent),
        _ => {}
    }

    match ErrorBody::parse(&raw.body) {
        Ok(body) => {
            let error_type = body.error.unwrap_or_default();
            let message = body.message.unwrap_or_default();
            warn!("{operation}: status {} ({error_type}): {message}", raw.status);
            Err(C8yError::ServerReported {
                operation: operation.to_string(),
                status: raw.status,
                error_type,
                message,
                info: body.info.unwrap_or_default(),
            })
        }
        Err(e) => {
            warn!("{operation}: status {} with unparsable body", raw.status);
            Err(C8yError::client(
                operation,
                format!("unexpected status {}; failed to parse error body: {e}", raw.status),
            ))
        }
    }
}

/// Decode a JSON body into `T`.
pub fn decode<T: DeserializeOwned>(operation: &str, body: &[u8]) -> C8yResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| C8yError::client(operation, format!("failed to decode response: {e}")))
}
