//! Event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::managed_object::SourceRef;

/// Something that happened on a device at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub text: String,
    pub time: DateTime<Utc>,
    pub source: SourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,

    #[serde(flatten)]
    pub fragments: Map<String, Value>,
}

impl Event {
    pub fn new(
        source_id: impl Into<String>,
        event_type: impl Into<String>,
        text: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            event_type: event_type.into(),
            text: text.into(),
            time,
            source: SourceRef::new(source_id),
            creation_time: None,
            self_url: None,
            fragments: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_with_offset_time() {
        let json = r#"{
            "id": "77",
            "type": "c8y_DoorOpened",
            "text": "Door opened",
            "time": "2024-03-01T10:00:00.000+01:00",
            "source": {"id": "10200", "self": "https://t1.example.com/inventory/managedObjects/10200"}
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.time, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        assert_eq!(event.source.id, "10200");
    }
}
