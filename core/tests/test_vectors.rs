//! Verify build/parse methods against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request shape, simulated
//! responses, and the expected parse outcome. Signed headers are checked
//! structurally (scheme and account) rather than byte-for-byte, since the
//! signature covers the request date.

use fileshare_core::config::{ClientConfig, SERVICE_VERSION};
use fileshare_core::{FileShareClient, HttpMethod, HttpRequest, HttpResponse, ShareError};

const ACCOUNT: &str = "testaccount";

fn client() -> FileShareClient {
    FileShareClient::new(
        ClientConfig::new(ACCOUNT, fileshare_core::config::DEV_STORE_ACCOUNT_KEY).unwrap(),
    )
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(req.path, expected["path"].as_str().unwrap(), "{name}: path");
    assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
    assert!(req.body.is_none(), "{name}: body should be None");

    assert_eq!(
        req.header("x-ms-version"),
        Some(SERVICE_VERSION),
        "{name}: version header"
    );
    assert!(req.header("x-ms-date").is_some(), "{name}: date header");
    let auth = req.header("authorization").unwrap_or_default();
    assert!(
        auth.starts_with(&format!("SharedKey {ACCOUNT}:")),
        "{name}: authorization header"
    );
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: pairs(&sim["headers"]),
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn check_error(name: &str, err: &ShareError, expected: &str) {
    match expected {
        "Conflict" => assert!(matches!(err, ShareError::Conflict { .. }), "{name}: {err:?}"),
        "NotFound" => assert!(matches!(err, ShareError::NotFound { .. }), "{name}: {err:?}"),
        "Service" => assert!(matches!(err, ShareError::Service { .. }), "{name}: {err:?}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let share_name = case["share_name"].as_str().unwrap();

        let req = c.build_create_share(share_name).unwrap();
        check_request(name, &req, &case["expected_request"]);
        assert_eq!(req.header("content-length"), Some("0"), "{name}: content-length");

        let result = c.parse_create_share(simulated(case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../test-vectors/delete.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let share_name = case["share_name"].as_str().unwrap();

        let req = c.build_delete_share(share_name).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_share(simulated(case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn properties_test_vectors() {
    let raw = include_str!("../test-vectors/properties.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let share_name = case["share_name"].as_str().unwrap();

        let req = c.build_get_share_properties(share_name).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_share_properties(simulated(case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
            None => {
                let props = result.unwrap();
                let expected: fileshare_core::ShareProperties =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(props, expected, "{name}: parsed result");
            }
        }
    }
}
