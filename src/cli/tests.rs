//! Tests for the CLI

use super::*;
use crate::error::Error;
use clap::Parser;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["tap-showpad"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn config_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"api_key": "secret-token", "subdomain": "acme"}}"#).unwrap();
    file
}

async fn run(cli: Cli) -> crate::error::Result<String> {
    let mut out = Vec::new();
    Runner::new(cli).run_to(&mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn lines(out: &str) -> Vec<Value> {
    out.lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

// ============================================================================
// Argument Parsing Tests
// ============================================================================

#[test]
fn test_mode_selection() {
    assert_eq!(cli(&["--about"]).mode(), Mode::About);
    assert_eq!(cli(&["--discover"]).mode(), Mode::Discover);
    assert_eq!(cli(&["--config", "c.json"]).mode(), Mode::Sync);
}

#[test]
fn test_about_conflicts_with_discover() {
    assert!(Cli::try_parse_from(["tap-showpad", "--about", "--discover"]).is_err());
}

#[test]
fn test_streams_are_comma_separated() {
    let parsed = cli(&["--streams", "users,assets", "--max-records", "10"]);
    assert_eq!(parsed.streams, vec!["users".to_string(), "assets".to_string()]);
    assert_eq!(parsed.max_records, Some(10));
}

// ============================================================================
// About / Discover Tests
// ============================================================================

#[tokio::test]
async fn test_about_lists_settings_and_streams() {
    let out = run(cli(&["--about", "--format", "json"])).await.unwrap();
    let about: Value = serde_json::from_str(out.trim()).unwrap();

    assert_eq!(about["name"], "tap-showpad");
    assert_eq!(about["settings"]["required"], json!(["api_key", "subdomain"]));
    assert_eq!(about["streams"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_discover_prints_catalog() {
    let out = run(cli(&["--discover"])).await.unwrap();
    let catalog: Value = serde_json::from_str(&out).unwrap();

    let names: Vec<&str> = catalog["streams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["stream"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"sharedspaceparticipants"));
    assert_eq!(names.len(), 7);
}

#[tokio::test]
async fn test_discover_from_openapi() {
    let mut doc = NamedTempFile::new().unwrap();
    let openapi = json!({"paths": {"/tags.json": {"get": {
        "operationId": "get_tags",
        "responses": {"default": {"content": {"application/json": {"schema": {
            "required": ["response"],
            "properties": {"response": {"properties": {
                "items": {"type": "array", "items": {"type": "object"}}
            }}}
        }}}}}
    }}}});
    write!(doc, "{openapi}").unwrap();

    let out = run(cli(&[
        "--discover",
        "--openapi",
        doc.path().to_str().unwrap(),
    ]))
    .await
    .unwrap();
    let catalog: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(catalog["streams"][0]["tap_stream_id"], "tags");
    assert_eq!(catalog["streams"][0]["key_properties"], json!(["id"]));
}

// ============================================================================
// Sync Tests
// ============================================================================

#[tokio::test]
async fn test_sync_requires_config() {
    let err = run(cli(&[])).await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[tokio::test]
async fn test_sync_unknown_stream() {
    let config = config_file();
    let err = run(cli(&[
        "--config",
        config.path().to_str().unwrap(),
        "--streams",
        "users,nope",
    ]))
    .await
    .unwrap_err();
    assert!(matches!(err, Error::StreamNotFound { stream } if stream == "nope"));
}

#[tokio::test]
async fn test_sync_selected_stream_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/exports/divisions.json"))
        .and(query_param("limit", "50000"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"count": 2, "items": [
                {"divisionId": "d1", "name": "Sales"},
                {"divisionId": "d2", "name": "Marketing"}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_file();
    let base_url = format!("{}/api/v3", server.uri());
    let out = run(cli(&[
        "--config",
        config.path().to_str().unwrap(),
        "--streams",
        "divisions",
        "--base-url",
        &base_url,
    ]))
    .await
    .unwrap();

    let messages = lines(&out);
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["type"], "SCHEMA");
    assert_eq!(messages[0]["stream"], "divisions");
    assert_eq!(messages[1]["record"]["divisionId"], "d1");
    assert_eq!(messages[2]["record"]["name"], "Marketing");
}

#[tokio::test]
async fn test_sync_respects_catalog_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/exports/channels.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": {"count": 0, "items": []}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let streams = crate::streams::builtin_streams().unwrap();
    let mut catalog = crate::streams::Catalog::from_streams(&streams);
    for entry in &mut catalog.streams {
        let selected = entry.tap_stream_id == "channels";
        entry.metadata[0]
            .metadata
            .insert("selected".into(), json!(selected));
    }
    let mut catalog_file = NamedTempFile::new().unwrap();
    write!(catalog_file, "{}", catalog.to_json()).unwrap();

    let config = config_file();
    let base_url = format!("{}/api/v3", server.uri());
    let out = run(cli(&[
        "--config",
        config.path().to_str().unwrap(),
        "--catalog",
        catalog_file.path().to_str().unwrap(),
        "--base-url",
        &base_url,
    ]))
    .await
    .unwrap();

    let messages = lines(&out);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["stream"], "channels");
}
