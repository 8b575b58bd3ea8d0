//! Typed query filters for collection requests.
//!
//! A filter turns into an ordered list of query pairs. Keys may repeat;
//! encoding is left to the request builder.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::operation::OperationStatus;

/// Anything that contributes query parameters to a collection request.
pub trait QueryFilter {
    fn query_pairs(&self) -> Vec<(String, String)>;
}

/// No filtering.
impl QueryFilter for () {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

impl QueryFilter for [(String, String)] {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.to_vec()
    }
}

impl QueryFilter for Vec<(String, String)> {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.clone()
    }
}

fn push(pairs: &mut Vec<(String, String)>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        pairs.push((key.to_string(), v.clone()));
    }
}

fn push_time(pairs: &mut Vec<(String, String)>, key: &str, value: &Option<DateTime<Utc>>) {
    if let Some(t) = value {
        pairs.push((key.to_string(), t.to_rfc3339_opts(SecondsFormat::Millis, true)));
    }
}

/// Filter for `/event/events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub source: Option<String>,
    pub event_type: Option<String>,
    pub fragment_type: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl QueryFilter for EventFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "source", &self.source);
        push(&mut pairs, "type", &self.event_type);
        push(&mut pairs, "fragmentType", &self.fragment_type);
        push_time(&mut pairs, "dateFrom", &self.date_from);
        push_time(&mut pairs, "dateTo", &self.date_to);
        pairs
    }
}

/// Filter for `/devicecontrol/operations`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFilter {
    pub device_id: Option<String>,
    pub agent_id: Option<String>,
    pub bulk_operation_id: Option<String>,
    pub status: Option<OperationStatus>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl QueryFilter for OperationFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "deviceId", &self.device_id);
        push(&mut pairs, "agentId", &self.agent_id);
        push(&mut pairs, "bulkOperationId", &self.bulk_operation_id);
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        push_time(&mut pairs, "dateFrom", &self.date_from);
        push_time(&mut pairs, "dateTo", &self.date_to);
        pairs
    }
}

/// Filter for `/inventory/managedObjects`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedObjectFilter {
    pub object_type: Option<String>,
    pub fragment_type: Option<String>,
    pub owner: Option<String>,
    pub text: Option<String>,
    /// Sent as one comma-separated `ids` parameter.
    pub ids: Vec<String>,
    /// Inventory query language expression.
    pub query: Option<String>,
}

impl QueryFilter for ManagedObjectFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "type", &self.object_type);
        push(&mut pairs, "fragmentType", &self.fragment_type);
        push(&mut pairs, "owner", &self.owner);
        push(&mut pairs, "text", &self.text);
        if !self.ids.is_empty() {
            pairs.push(("ids".to_string(), self.ids.join(",")));
        }
        push(&mut pairs, "query", &self.query);
        pairs
    }
}

/// Filter for `/user/{tenant}/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub username: Option<String>,
    pub owner: Option<String>,
    /// One `groups` parameter per group id.
    pub groups: Vec<String>,
    pub only_devices: Option<bool>,
}

impl QueryFilter for UserFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "username", &self.username);
        push(&mut pairs, "owner", &self.owner);
        for group in &self.groups {
            pairs.push(("groups".to_string(), group.clone()));
        }
        if let Some(only) = self.only_devices {
            pairs.push(("onlyDevices".to_string(), only.to_string()));
        }
        pairs
    }
}
