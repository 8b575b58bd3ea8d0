//! Integration tests for the resource façades.
//!
//! Covers request assembly (paths, headers, auth, query order), the
//! empty-id guard, error mapping as seen through a façade, and the
//! resource-specific helpers.

mod common;

use common::{test_client, ScriptedTransport, AUTH};

use c8y_api::{PageSize, QueryParams};
use c8y_core::{C8yError, ErrorKind};
use c8y_models::{
    DeviceCredentials, EventFilter, ManagedObject, ManagedObjectFilter, NewDeviceRequest,
    NewDeviceRequestStatus, OperationStatus, UserFilter,
};
use serde_json::{json, Value};

fn body_json(body: &Option<Vec<u8>>) -> Value {
    serde_json::from_slice(body.as_deref().expect("request had no body")).unwrap()
}

// ---- Request assembly ----

#[test]
fn get_device_request_returns_typed_item() {
    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"id":"4711","status":"PENDING_ACCEPTANCE"}"#);
    let client = test_client(&transport);

    let request = client.device_requests().get("4711").unwrap();
    assert_eq!(request.id, "4711");
    assert_eq!(request.status, Some(NewDeviceRequestStatus::PendingAcceptance));

    let sent = transport.last();
    assert_eq!(sent.method, reqwest::Method::GET);
    assert_eq!(sent.url.as_str(), "https://t1.example.com/devicecontrol/newDeviceRequests/4711");
    assert_eq!(sent.header("Authorization"), Some(AUTH));
    assert_eq!(sent.header("Accept"), Some("application/vnd.x.newDeviceRequest+json"));
    assert!(sent.header("Content-Type").is_none());
}

#[test]
fn empty_id_is_rejected_without_a_request() {
    let transport = ScriptedTransport::new();
    let client = test_client(&transport);

    for id in ["", "   "] {
        let err = client.device_requests().get(id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientError);
        assert!(
            err.to_string().contains("get new device request without an id is not allowed"),
            "{err}"
        );
    }
    assert!(client.managed_objects().delete("").is_err());
    assert!(client.operations().find_by_id("").is_err());
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn blank_parent_or_tenant_is_rejected_without_a_request() {
    let transport = ScriptedTransport::new();
    transport.respond(204, "");
    let client = test_client(&transport);

    let err = client.child_devices("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert!(err.to_string().contains("without an id is not allowed"), "{err}");
    assert!(client.child_assets("  ").is_err());
    assert!(client.child_additions("").is_err());

    for err in [client.users("").unwrap_err(), client.groups(" ").unwrap_err()] {
        assert_eq!(err.kind(), ErrorKind::ClientError);
        assert!(err.to_string().contains("without an id is not allowed"), "{err}");
    }
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn create_sends_both_media_types_and_json_body() {
    let transport = ScriptedTransport::new();
    transport.respond(201, r#"{"id":"10","name":"Pump","type":"c8y_Pump","c8y_IsDevice":{}}"#);
    let client = test_client(&transport);

    let payload = ManagedObject::new("Pump", "c8y_Pump").with_fragment("c8y_IsDevice", json!({}));
    let created = client.managed_objects().create(&payload).unwrap();
    assert_eq!(created.id.as_deref(), Some("10"));
    assert!(created.has_fragment("c8y_IsDevice"));

    let sent = transport.last();
    assert_eq!(sent.method, reqwest::Method::POST);
    assert_eq!(sent.url.path(), "/inventory/managedObjects");
    assert_eq!(sent.header("accept"), Some("application/vnd.x.managedObject+json"));
    assert_eq!(sent.header("content-type"), Some("application/vnd.x.managedObject+json"));
    assert_eq!(
        body_json(&sent.body),
        json!({"name": "Pump", "type": "c8y_Pump", "c8y_IsDevice": {}})
    );
}

#[test]
fn create_expects_created_status() {
    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"id":"10","name":"Pump"}"#);
    let client = test_client(&transport);

    let err = client.managed_objects().create(&ManagedObject::new("Pump", "c8y_Pump")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
}

#[test]
fn delete_sends_no_content_headers() {
    let transport = ScriptedTransport::new();
    transport.respond(204, "");
    let client = test_client(&transport);

    client.events().delete("77").unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, reqwest::Method::DELETE);
    assert_eq!(sent.url.path(), "/event/events/77");
    assert_eq!(sent.header("authorization"), Some(AUTH));
    assert!(sent.header("accept").is_none());
    assert!(sent.header("content-type").is_none());
    assert!(sent.body.is_none());
}

#[test]
fn ids_are_encoded_as_one_path_segment() {
    let transport = ScriptedTransport::new();
    transport.respond(204, "");
    let client = test_client(&transport);

    client.roles().delete("a b/c").unwrap();
    assert_eq!(transport.last().url.path(), "/user/roles/a%20b%2Fc");
}

#[test]
fn list_sends_page_size_first_then_filter() {
    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"self":"x","managedObjects":[{"id":"1"},{"id":"2"}],"statistics":{"pageSize":2,"currentPage":1}}"#);
    let client = test_client(&transport);

    let filter = ManagedObjectFilter {
        object_type: Some("c8y_Pump".into()),
        ids: vec!["1".into(), "2".into()],
        ..Default::default()
    };
    let page = client
        .managed_objects()
        .list(PageSize::new(2).unwrap(), &filter)
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.statistics.page_size, 2);

    let sent = transport.last();
    assert_eq!(sent.url.query(), Some("pageSize=2&type=c8y_Pump&ids=1%2C2"));
    assert_eq!(sent.header("accept"), Some("application/vnd.x.managedObjectCollection+json"));
}

#[test]
fn list_with_repeated_keys_keeps_every_value() {
    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"users":[]}"#);
    let client = test_client(&transport);

    let filter = UserFilter {
        groups: vec!["3".into(), "4".into()],
        only_devices: Some(false),
        ..Default::default()
    };
    let page = client.users("t1").unwrap().list(PageSize::DEFAULT, &filter).unwrap();
    assert!(page.is_empty());

    let sent = transport.last();
    assert_eq!(sent.url.path(), "/user/t1/users");
    let query = QueryParams::decode(sent.url.query().unwrap());
    assert_eq!(
        query.pairs(),
        &[
            ("pageSize".to_string(), "5".to_string()),
            ("groups".to_string(), "3".to_string()),
            ("groups".to_string(), "4".to_string()),
            ("onlyDevices".to_string(), "false".to_string()),
        ]
    );
}

#[test]
fn list_encodes_time_filters() {
    use chrono::TimeZone;

    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"events":[]}"#);
    let client = test_client(&transport);

    let filter = EventFilter {
        source: Some("10".into()),
        date_from: Some(chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        ..Default::default()
    };
    client.events().list(PageSize::DEFAULT, &filter).unwrap();

    let query = QueryParams::decode(transport.last().url.query().unwrap());
    assert_eq!(query.get("source"), Some("10"));
    assert_eq!(query.get("dateFrom"), Some("2024-03-01T12:00:00.000Z"));
}

// ---- Error mapping through a façade ----

#[test]
fn unauthorized_and_forbidden_ignore_non_json_bodies() {
    let transport = ScriptedTransport::new();
    transport.respond(401, "<html><body>Unauthorized</body></html>");
    transport.respond(403, "");
    let client = test_client(&transport);

    let err = client.events().get("1").unwrap_err();
    assert!(matches!(err, C8yError::BadCredentials { ref operation } if operation == "get event"));

    let err = client.events().get("1").unwrap_err();
    assert!(matches!(err, C8yError::AccessDenied { ref operation } if operation == "get event"));
}

#[test]
fn structured_error_is_returned_verbatim() {
    let transport = ScriptedTransport::new();
    transport.respond(
        422,
        r#"{"error":"devicecontrol/Unprocessable","message":"id already registered","info":"https://docs.example.com/errors"}"#,
    );
    let client = test_client(&transport);

    let err = client.device_requests().create(&NewDeviceRequest::new("4711")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerReportedError);
    assert_eq!(err.status(), Some(422));
    match err {
        C8yError::ServerReported { operation, error_type, message, info, .. } => {
            assert_eq!(operation, "create new device request");
            assert_eq!(error_type, "devicecontrol/Unprocessable");
            assert_eq!(message, "id already registered");
            assert_eq!(info, "https://docs.example.com/errors");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn server_error_with_garbage_body_is_client_error() {
    let transport = ScriptedTransport::new();
    transport.respond(500, "#");
    let client = test_client(&transport);

    let err = client.device_requests().get("4711").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert_eq!(err.operation(), Some("get new device request"));
}

#[test]
fn get_on_404_is_an_error_but_find_by_id_is_absent() {
    let transport = ScriptedTransport::new();
    let not_found = r#"{"error":"inventory/Not Found","message":"no managed object for id 9"}"#;
    transport.respond(404, not_found);
    transport.respond(404, not_found);
    let client = test_client(&transport);

    let err = client.managed_objects().get("9").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerReportedError);
    assert_eq!(err.status(), Some(404));

    assert!(client.managed_objects().find_by_id("9").unwrap().is_none());
}

#[test]
fn find_by_id_returns_existing_item() {
    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"id":"9","name":"Valve"}"#);
    let client = test_client(&transport);

    let found = client.managed_objects().find_by_id("9").unwrap().unwrap();
    assert_eq!(found.name.as_deref(), Some("Valve"));
}

#[test]
fn empty_success_body_is_client_error_when_content_expected() {
    let transport = ScriptedTransport::new();
    transport.respond(200, "");
    let client = test_client(&transport);

    let err = client.roles().get("ROLE_X").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
}

#[test]
fn transport_failure_is_client_error() {
    let transport = ScriptedTransport::new();
    let client = test_client(&transport);

    let err = client.events().get("1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert!(err.to_string().contains("no scripted response left"), "{err}");
}

// ---- Resource-specific helpers ----

#[test]
fn accept_device_request_puts_status() {
    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"id":"4711","status":"ACCEPTED"}"#);
    let client = test_client(&transport);

    let accepted = client.device_requests().accept("4711").unwrap();
    assert_eq!(accepted.status, Some(NewDeviceRequestStatus::Accepted));

    let sent = transport.last();
    assert_eq!(sent.method, reqwest::Method::PUT);
    assert_eq!(sent.url.path(), "/devicecontrol/newDeviceRequests/4711");
    assert_eq!(body_json(&sent.body), json!({"status": "ACCEPTED"}));
}

#[test]
fn poll_device_credentials_until_accepted() {
    let transport = ScriptedTransport::new();
    transport.respond(404, "");
    transport.respond(
        201,
        r#"{"id":"4711","tenantId":"t1","username":"device_4711","password":"p4ss"}"#,
    );
    let client = test_client(&transport);

    assert!(client.device_credentials().poll("4711").unwrap().is_none());
    let creds: DeviceCredentials = client.device_credentials().poll("4711").unwrap().unwrap();
    assert_eq!(creds.username.as_deref(), Some("device_4711"));

    for sent in transport.requests() {
        assert_eq!(sent.method, reqwest::Method::POST);
        assert_eq!(sent.url.path(), "/devicecontrol/deviceCredentials");
        assert_eq!(body_json(&sent.body), json!({"id": "4711"}));
    }
}

#[test]
fn request_device_credentials_treats_404_as_error() {
    let transport = ScriptedTransport::new();
    transport.respond(404, r#"{"error":"devicecontrol/Not Found","message":"pending"}"#);
    let client = test_client(&transport);

    let err = client.device_credentials().request("4711").unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn add_child_device_accepts_empty_created() {
    let transport = ScriptedTransport::new();
    transport.respond(201, "");
    transport.respond(201, r#"{"managedObject":{"id":"11"}}"#);
    let client = test_client(&transport);

    client.child_devices("10").unwrap().add("11").unwrap();
    client.child_devices("10").unwrap().add("11").unwrap();

    let sent = transport.last();
    assert_eq!(sent.url.path(), "/inventory/managedObjects/10/childDevices");
    assert_eq!(
        sent.header("content-type"),
        Some("application/vnd.x.managedObjectReference+json")
    );
    assert_eq!(body_json(&sent.body), json!({"managedObject": {"id": "11"}}));
}

#[test]
fn remove_child_asset_deletes_reference() {
    let transport = ScriptedTransport::new();
    transport.respond(204, "");
    let client = test_client(&transport);

    client.child_assets("10").unwrap().remove("12").unwrap();
    let sent = transport.last();
    assert_eq!(sent.method, reqwest::Method::DELETE);
    assert_eq!(sent.url.path(), "/inventory/managedObjects/10/childAssets/12");
}

#[test]
fn set_operation_status_with_failure_reason() {
    let transport = ScriptedTransport::new();
    transport.respond(200, r#"{"id":"5","status":"FAILED","failureReason":"timeout"}"#);
    let client = test_client(&transport);

    let op = client
        .operations()
        .set_status("5", OperationStatus::Failed, Some("timeout"))
        .unwrap();
    assert_eq!(op.status, Some(OperationStatus::Failed));
    assert_eq!(
        body_json(&transport.last().body),
        json!({"status": "FAILED", "failureReason": "timeout"})
    );
}

#[test]
fn assign_user_to_group_posts_reference() {
    let transport = ScriptedTransport::new();
    transport.respond(201, "");
    let client = test_client(&transport);

    client
        .groups("t1")
        .unwrap()
        .assign_user("3", "https://t1.example.com/user/t1/users/jdoe")
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.url.path(), "/user/t1/groups/3/users");
    assert_eq!(sent.header("content-type"), Some("application/vnd.x.userReference+json"));
    assert_eq!(
        body_json(&sent.body),
        json!({"user": {"self": "https://t1.example.com/user/t1/users/jdoe"}})
    );
}
