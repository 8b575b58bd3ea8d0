//! Bulk operation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkOperationStatus {
    Active,
    InProgress,
    Completed,
    Deleted,
}

/// Per-state counts of the operations spawned by a bulk operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperationProgress {
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub executing: u64,
    #[serde(default)]
    pub successful: u64,
    #[serde(default)]
    pub all: u64,
}

/// One operation prototype applied to every device of a group, ramped over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Seconds between two consecutive device operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_ramp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_prototype: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BulkOperationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<BulkOperationProgress>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}
