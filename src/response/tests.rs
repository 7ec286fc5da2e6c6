//! Tests for the response module

use super::*;
use crate::codec::Timestamp;
use crate::error::Error;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Zone {
    id: String,
    name: String,
    ttl: u32,
}

fn zone_outcome(status: u16) -> RawOutcome {
    RawOutcome::json(
        status,
        &json!({"zone": {"id": "z1", "name": "example.org.", "ttl": 7200}}),
    )
}

// ============================================================================
// RawOutcome Tests
// ============================================================================

#[test]
fn test_raw_outcome_accessors() {
    let raw = zone_outcome(200);
    assert_eq!(raw.content_type().as_deref(), Some("application/json"));
    assert!(raw.text().contains("example.org."));

    let mut headers = HeaderMap::new();
    headers.insert(
        "content-type",
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    let raw = RawOutcome::new(200, headers, "a\nb\n");
    assert_eq!(raw.content_type().as_deref(), Some("text/plain"));
    assert_eq!(raw.header("Content-Type"), Some("text/plain; charset=utf-8"));
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_extract_success_with_root_key() {
    let result: ApiResult<Zone> =
        ApiResult::from_outcome(Ok(zone_outcome(200)), &[200]).with_root_key("zone");

    assert!(result.is_ok());
    assert_eq!(result.status(), Some(200));
    let zone = result.extract().unwrap();
    assert_eq!(zone.name, "example.org.");

    // Extraction is repeatable and yields an equal value
    assert_eq!(result.extract().unwrap(), zone);
}

#[test]
fn test_unexpected_status_skips_decoding() {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static("text/html"));
    let raw = RawOutcome::new(404, headers, "<html>not json</html>");

    let result: ApiResult<Zone> = ApiResult::from_outcome(Ok(raw), &[200]).with_root_key("zone");

    assert!(!result.is_ok());
    assert_eq!(result.status(), Some(404));
    match result.extract() {
        Err(Error::UnexpectedStatus {
            status,
            expected,
            body,
        }) => {
            assert_eq!(status, 404);
            assert_eq!(expected, vec![200]);
            assert_eq!(body, "<html>not json</html>");
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}

#[test]
fn test_transport_error_passes_through() {
    let result: ApiResult<Zone> =
        ApiResult::from_outcome(Err(Error::transport("connection refused")), &[200]);

    assert_eq!(result.status(), None);
    assert!(matches!(result.extract(), Err(Error::Transport { .. })));
    assert!(matches!(result.extract_err(), Err(Error::Transport { .. })));
}

#[test]
fn test_from_error_keeps_validation() {
    let result: ApiResult<Zone> = ApiResult::from_error(Error::missing_field("name"));
    assert!(matches!(result.extract(), Err(Error::Validation { .. })));
    assert!(result.raw().is_none());
}

#[test]
fn test_extract_err_for_delete() {
    let result: ErrResult =
        ApiResult::from_outcome(Ok(RawOutcome::new(204, HeaderMap::new(), "")), &[202, 204]);
    assert!(result.extract_err().is_ok());

    let result: ErrResult = ApiResult::from_outcome(
        Ok(RawOutcome::new(409, HeaderMap::new(), "conflict")),
        &[202, 204],
    );
    assert_eq!(result.extract_err().unwrap_err().status(), Some(409));
}

#[test]
fn test_decode_error_on_accepted_status() {
    let raw = RawOutcome::new(200, HeaderMap::new(), "{\"zone\": [1, 2");
    let result: ApiResult<Zone> = ApiResult::from_outcome(Ok(raw), &[200]).with_root_key("zone");
    assert!(result.extract_err().is_ok());
    assert!(matches!(result.extract(), Err(Error::Decode { .. })));
}

#[test]
fn test_extract_into_and_cast() {
    let result = ApiResult::<serde_json::Value>::from_outcome(Ok(zone_outcome(201)), &[201]);
    let value = result.extract().unwrap();
    assert_eq!(value["zone"]["ttl"], 7200);

    let ttl: serde_json::Value = result.extract_into(Some("zone")).unwrap();
    assert_eq!(ttl["ttl"], 7200);

    let typed: ApiResult<Zone> = result.cast::<Zone>().with_root_key("zone");
    assert_eq!(typed.extract().unwrap().id, "z1");
}

// ============================================================================
// Header Extraction Tests
// ============================================================================

#[derive(Debug, Deserialize)]
struct ContainerHeader {
    #[serde(rename = "x-container-object-count")]
    object_count: String,
    #[serde(rename = "x-trans-id")]
    trans_id: String,
    #[serde(default)]
    date: Timestamp,
}

#[test]
fn test_extract_headers() {
    let mut headers = HeaderMap::new();
    headers.insert("X-Container-Object-Count", HeaderValue::from_static("5"));
    headers.insert("X-Trans-Id", HeaderValue::from_static("tx554ed59667a64c61866f1"));
    headers.insert(
        "Date",
        HeaderValue::from_static("Wed, 17 Aug 2016 19:25:43 GMT"),
    );
    let raw = RawOutcome::new(204, headers, "");

    let result: ErrResult = ApiResult::from_outcome(Ok(raw), &[204]);
    let parsed: ContainerHeader = result.extract_headers().unwrap();

    assert_eq!(parsed.object_count, "5");
    assert_eq!(parsed.trans_id, "tx554ed59667a64c61866f1");
    assert_eq!(
        parsed.date.to_rfc3339_milli().as_deref(),
        Some("2016-08-17T19:25:43.000Z")
    );
}
