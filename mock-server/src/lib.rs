//! In-memory emulator of the file-share service wire protocol.
//!
//! Implements the share-level subset the client core exercises: create,
//! delete and get-properties on `/{account}/{share}?restype=share`, with
//! Shared Key verification and XML error bodies matching the live service.
//! Used by integration tests and runnable standalone as the
//! local-development endpoint.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::Response,
    routing::put,
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

use fileshare_core::auth;
use fileshare_core::config::{ClientConfig, DEV_STORE_ACCOUNT, SERVICE_VERSION};
use fileshare_core::http::HttpMethod;

/// One stored share: the properties reported back on a GET.
#[derive(Clone, Debug)]
pub struct ShareRecord {
    pub etag: String,
    pub last_modified: String,
    pub metadata: Vec<(String, String)>,
}

pub type Db = Arc<RwLock<HashMap<String, ShareRecord>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/{account}/{share}",
            put(create_share).get(get_share_properties).delete(delete_share),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_share(
    State(db): State<Db>,
    Path((account, share)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = validate(&method, &account, &share, &headers, query.as_deref()) {
        return rejection;
    }
    let mut shares = db.write().await;
    if shares.contains_key(&share) {
        return error_response(
            StatusCode::CONFLICT,
            "ShareAlreadyExists",
            "The specified share already exists.",
        );
    }
    let record = ShareRecord {
        etag: new_etag(),
        last_modified: now_rfc1123(),
        metadata: metadata_from_headers(&headers),
    };
    let response = share_response(StatusCode::CREATED, &record, false);
    shares.insert(share, record);
    response
}

async fn get_share_properties(
    State(db): State<Db>,
    Path((account, share)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = validate(&method, &account, &share, &headers, query.as_deref()) {
        return rejection;
    }
    let shares = db.read().await;
    match shares.get(&share) {
        Some(record) => share_response(StatusCode::OK, record, true),
        None => share_not_found(),
    }
}

async fn delete_share(
    State(db): State<Db>,
    Path((account, share)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = validate(&method, &account, &share, &headers, query.as_deref()) {
        return rejection;
    }
    let mut shares = db.write().await;
    match shares.remove(&share) {
        Some(_) => Response::builder()
            .status(StatusCode::ACCEPTED)
            .header("x-ms-request-id", Uuid::new_v4().to_string())
            .header("x-ms-version", SERVICE_VERSION)
            .body(Body::empty())
            .unwrap(),
        None => share_not_found(),
    }
}

/// Shared request checks: resource addressing, account, signature.
fn validate(
    method: &Method,
    account: &str,
    share: &str,
    headers: &HeaderMap,
    raw_query: Option<&str>,
) -> Result<(), Response> {
    let query = query_pairs(raw_query.unwrap_or(""));
    let restype = query
        .iter()
        .find(|(n, _)| n == "restype")
        .map(|(_, v)| v.as_str());
    if restype != Some("share") {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "InvalidQueryParameterValue",
            "restype must be 'share' for share-level operations.",
        ));
    }

    if account != DEV_STORE_ACCOUNT {
        return Err(auth_failed("Unknown storage account."));
    }

    let ms_method = match method.as_str() {
        "GET" => HttpMethod::Get,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        _ => return Err(auth_failed("Unsupported verb.")),
    };

    // Recompute the signature with the same canonicalization the client
    // used; any tampering with signed headers shows up as a mismatch.
    let header_pairs: Vec<(String, String)> = headers
        .iter()
        .filter_map(|(n, v)| Some((n.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let path = format!("/{account}/{share}");
    let sts = auth::string_to_sign(ms_method, &header_pairs, DEV_STORE_ACCOUNT, &path, &query);
    let dev = ClientConfig::development();
    let expected = auth::authorization(DEV_STORE_ACCOUNT, dev.account_key(), &sts);

    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(received) if received == expected => Ok(()),
        Some(_) => Err(auth_failed(
            "The MAC signature found in the HTTP request is not the same as any computed signature.",
        )),
        None => Err(auth_failed("Authorization header is required.")),
    }
}

fn share_response(status: StatusCode, record: &ShareRecord, with_metadata: bool) -> Response {
    let mut builder = Response::builder()
        .status(status)
        .header(header::ETAG, record.etag.as_str())
        .header(header::LAST_MODIFIED, record.last_modified.as_str())
        .header("x-ms-request-id", Uuid::new_v4().to_string())
        .header("x-ms-version", SERVICE_VERSION);
    if with_metadata {
        for (name, value) in &record.metadata {
            builder = builder.header(format!("x-ms-meta-{name}"), value.as_str());
        }
    }
    builder.body(Body::empty()).unwrap()
}

fn share_not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "ShareNotFound",
        "The specified share does not exist.",
    )
}

fn auth_failed(message: &str) -> Response {
    error_response(StatusCode::FORBIDDEN, "AuthenticationFailed", message)
}

/// XML error body in the service's `<Error>` envelope.
fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Error><Code>{}</Code><Message>{}</Message></Error>",
        xml_escape(code),
        xml_escape(message)
    );
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/xml")
        .header("x-ms-request-id", Uuid::new_v4().to_string())
        .header("x-ms-version", SERVICE_VERSION)
        .body(Body::from(body))
        .unwrap()
}

fn metadata_from_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(n, v)| {
            let name = n.as_str().strip_prefix("x-ms-meta-")?;
            Some((name.to_string(), v.to_str().ok()?.to_string()))
        })
        .collect()
}

fn query_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect()
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn new_etag() -> String {
    format!("\"0x{}\"", Uuid::new_v4().simple().to_string().to_uppercase())
}

fn now_rfc1123() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
