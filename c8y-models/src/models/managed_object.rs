//! Inventory managed object and reference models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An inventory object: device, group, asset or any other managed entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Custom fragments, e.g. `c8y_IsDevice` or `c8y_Hardware`.
    #[serde(flatten)]
    pub fragments: Map<String, Value>,
}

impl ManagedObject {
    /// A creation payload with a name and type.
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            object_type: Some(object_type.into()),
            ..Default::default()
        }
    }

    /// Attach a fragment.
    pub fn with_fragment(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fragments.insert(name.into(), value);
        self
    }

    /// Whether the object carries the given fragment.
    pub fn has_fragment(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }
}

/// Reference from a parent managed object to a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedObjectReference {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    pub managed_object: SourceRef,
}

/// Minimal pointer to a managed object: id plus optional self link and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: String,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SourceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            self_url: None,
            name: None,
        }
    }
}

impl ManagedObjectReference {
    /// Payload that links the child with the given id.
    pub fn to(child_id: impl Into<String>) -> Self {
        Self {
            self_url: None,
            managed_object: SourceRef::new(child_id),
        }
    }
}
