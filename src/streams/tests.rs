//! Tests for the stream catalog module

use super::*;
use crate::error::Error;
use crate::types::{ApiVersion, ReplicationMethod};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;

fn envelope_response(item_schema: Value) -> Value {
    json!({
        "responses": {"default": {"content": {"application/json": {"schema": {
            "type": "object",
            "required": ["meta", "response"],
            "properties": {
                "meta": {"type": "object"},
                "response": {
                    "type": "object",
                    "properties": {
                        "count": {"type": "integer"},
                        "items": {"type": "array", "items": item_schema}
                    }
                }
            }
        }}}}}
    })
}

fn get_op(operation_id: &str, item_schema: Value) -> Value {
    let mut op = envelope_response(item_schema);
    op["operationId"] = json!(operation_id);
    json!({ "get": op })
}

// ============================================================================
// Descriptor Tests
// ============================================================================

#[test]
fn test_descriptor_url_joins_path() {
    let s = StreamDescriptor::new(
        "users",
        "/exports/users.json",
        vec!["userId".into()],
        ApiVersion::V3,
        json!({}),
    );
    assert_eq!(
        s.url("https://acme.showpad.biz/api/v3/"),
        "https://acme.showpad.biz/api/v3/exports/users.json"
    );
    assert_eq!(s.base_url("acme"), "https://acme.showpad.biz/api/v3");
    assert_eq!(s.records_path(), "$.response.items[*]");
    assert_eq!(s.replication_method, ReplicationMethod::FullTable);
}

#[test]
fn test_definition_unknown_version_rejected() {
    let yaml = r"
streams:
  - name: things
    path: /things
    api_version: v5
";
    let err = parse_stream_definitions(yaml, |_| None).unwrap_err();
    assert!(matches!(err, Error::UnsupportedApiVersion { version } if version == "v5"));
}

#[test]
fn test_definition_defaults() {
    let yaml = r"
streams:
  - name: things
    path: /things
  - name: widgets
    path: /widgets
    api_version: V4
    schema:
      type: object
";
    let streams = parse_stream_definitions(yaml, |_| None).unwrap();
    assert_eq!(streams[0].api_version, ApiVersion::V3);
    assert_eq!(streams[0].schema, open_object_schema());
    assert!(streams[0].primary_keys.is_empty());
    assert_eq!(streams[1].api_version, ApiVersion::V4);
    assert_eq!(streams[1].schema, json!({"type": "object"}));
}

#[test]
fn test_definition_empty_path_rejected() {
    let yaml = "streams:\n  - name: things\n    path: ''\n";
    let err = parse_stream_definitions(yaml, |_| None).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Built-in Stream Tests
// ============================================================================

#[test]
fn test_builtin_streams_table() {
    let streams = builtin_streams().unwrap();
    let table: Vec<(&str, &str, &str)> = streams
        .iter()
        .map(|s| (s.name.as_str(), s.path.as_str(), s.primary_keys[0].as_str()))
        .collect();

    assert_eq!(
        table,
        vec![
            ("sharedspaces", "/exports/sharedspaces.json", "sharedSpaceId"),
            (
                "sharedspaceparticipants",
                "/exports/sharedspaceparticipants.json",
                "sharedSpaceParticipantId"
            ),
            ("users", "/exports/users.json", "userId"),
            ("contacts", "/exports/contacts.json", "contactId"),
            ("divisions", "/exports/divisions.json", "divisionId"),
            ("channels", "/exports/channels.json", "channelId"),
            ("assets", "/exports/assets.json", "assetId"),
        ]
    );
    assert!(streams.iter().all(|s| s.api_version == ApiVersion::V3));
}

#[test]
fn test_builtin_schemas_embedded() {
    for stream in builtin_streams().unwrap() {
        let pk = &stream.primary_keys[0];
        assert_eq!(stream.schema["type"], "object", "{}", stream.name);
        assert!(stream.schema["properties"].get(pk).is_some(), "{}", stream.name);
        assert_eq!(
            stream.schema["properties"]["createdAt"]["format"],
            "date-time"
        );
    }
    assert_eq!(list_builtin().len(), 7);
    assert!(builtin_schema("nope").is_none());
}

// ============================================================================
// OpenAPI Discovery Tests
// ============================================================================

#[test]
fn test_openapi_envelope_endpoint_becomes_stream() {
    let item = json!({"type": "object", "properties": {"id": {"type": "string"}}});
    let doc = json!({"paths": {"/tags.json": get_op("get_tags", item.clone())}});

    let streams = discover_openapi(&doc).unwrap();
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0].name, "tags");
    assert_eq!(streams[0].path, "/tags.json");
    assert_eq!(streams[0].primary_keys, vec!["id".to_string()]);
    assert_eq!(streams[0].api_version, ApiVersion::V3);
    assert_eq!(streams[0].schema, item);
}

#[test]
fn test_openapi_accepts_snake_case_operation_id() {
    let mut methods = get_op("ignored", json!({}));
    let op = methods["get"].as_object_mut().unwrap();
    op.remove("operationId");
    op.insert("operation_id".into(), json!("listTickets"));

    let doc = json!({"paths": {"/tickets.json": methods}});
    let streams = discover_openapi(&doc).unwrap();
    assert_eq!(streams[0].name, "Tickets");
}

#[test]
fn test_openapi_skips_non_matching_paths() {
    let item = json!({"type": "object"});
    let mut no_op_id = get_op("x", item.clone());
    no_op_id["get"].as_object_mut().unwrap().remove("operationId");

    let doc = json!({"paths": {
        "/assets/{id}.json": get_op("get_asset", item.clone()),
        "/flat.json": {"get": {
            "operationId": "get_flat",
            "responses": {"default": {"content": {"application/json": {"schema": {
                "type": "object",
                "properties": {"items": {"type": "array"}}
            }}}}}
        }},
        "/no-items.json": {"get": {
            "operationId": "get_noitems",
            "responses": {"default": {"content": {"application/json": {"schema": {
                "required": ["response"],
                "properties": {"response": {"properties": {"count": {}}}}
            }}}}}
        }},
        "/write-only.json": {"post": get_op("post_thing", item.clone())["get"]},
        "/anonymous.json": no_op_id,
        "/short.json": get_op("get", item.clone()),
        "/users.json": get_op("get_users", item),
    }});

    let names: Vec<String> = discover_openapi(&doc)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["users".to_string()]);
}

#[test]
fn test_openapi_requires_paths() {
    let err = discover_openapi(&json!({"openapi": "3.0.0"})).unwrap_err();
    assert!(matches!(err, Error::OpenApi { .. }));
}

#[test]
fn test_load_openapi_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"paths": {{}}}}"#).unwrap();
    let doc = load_openapi(file.path()).unwrap();
    assert!(discover_openapi(&doc).unwrap().is_empty());

    let err = load_openapi("/no/such/openapi.json").unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_catalog_from_streams() {
    let streams = builtin_streams().unwrap();
    let catalog = Catalog::from_streams(&streams);
    let json = catalog.to_json();

    let users = &json["streams"][2];
    assert_eq!(users["tap_stream_id"], "users");
    assert_eq!(users["key_properties"], json!(["userId"]));
    assert_eq!(users["replication_method"], "FULL_TABLE");
    assert_eq!(users["metadata"][0]["breadcrumb"], json!([]));
    assert_eq!(users["metadata"][0]["metadata"]["selected"], true);
    assert_eq!(
        users["metadata"][0]["metadata"]["table-key-properties"],
        json!(["userId"])
    );
}

#[test]
fn test_catalog_selection_and_resolve() {
    let streams = builtin_streams().unwrap();
    let mut catalog = Catalog::from_streams(&streams);

    for entry in &mut catalog.streams {
        if entry.tap_stream_id != "users" && entry.tap_stream_id != "assets" {
            entry.metadata[0]
                .metadata
                .insert("selected".into(), json!(false));
        }
    }
    catalog.streams[6].schema = json!({"type": "object"});

    let resolved = catalog.resolve(&streams).unwrap();
    let names: Vec<&str> = resolved.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["users", "assets"]);
    assert_eq!(resolved[1].schema, json!({"type": "object"}));
}

#[test]
fn test_catalog_entry_without_metadata_is_selected() {
    let catalog = Catalog::from_json(
        r#"{"streams": [{"tap_stream_id": "users", "stream": "users", "schema": {}}]}"#,
    )
    .unwrap();
    assert_eq!(catalog.selected().count(), 1);
}

#[test]
fn test_catalog_unknown_stream() {
    let catalog = Catalog::from_json(
        r#"{"streams": [{"tap_stream_id": "ghosts", "stream": "ghosts", "schema": {}}]}"#,
    )
    .unwrap();
    let err = catalog.resolve(&builtin_streams().unwrap()).unwrap_err();
    assert!(matches!(err, Error::StreamNotFound { stream } if stream == "ghosts"));
}

#[test]
fn test_catalog_from_file() {
    let streams = builtin_streams().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", Catalog::from_streams(&streams).to_json()).unwrap();

    let catalog = Catalog::from_file(file.path()).unwrap();
    assert_eq!(catalog, Catalog::from_streams(&streams));

    assert!(matches!(
        Catalog::from_file("/no/such/catalog.json").unwrap_err(),
        Error::FileNotFound { .. }
    ));
}

#[test]
fn test_select_by_name() {
    let streams = builtin_streams().unwrap();

    let picked = select_by_name(&streams, &["assets".into(), "users".into()]).unwrap();
    let names: Vec<&str> = picked.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["assets", "users"]);

    let err = select_by_name(&streams, &["nope".into()]).unwrap_err();
    assert!(matches!(err, Error::StreamNotFound { .. }));
}
