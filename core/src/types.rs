//! Response DTOs for share operations.
//!
//! # Design
//! Share properties travel as response headers, not as a body, so the type
//! here is assembled from the header list rather than deserialized. Fields
//! the service may omit stay `Option`; header values are kept as the raw
//! strings the server sent — the server is authoritative on their format.

use serde::{Deserialize, Serialize};

use crate::http::header_value;

/// Metadata header prefix; the suffix is the user-supplied metadata name.
pub const METADATA_HEADER_PREFIX: &str = "x-ms-meta-";

/// Properties of a single share, as reported by a properties fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareProperties {
    /// Raw `Last-Modified` header value (RFC 1123).
    pub last_modified: Option<String>,
    /// Raw `ETag` header value, quotes included.
    pub etag: Option<String>,
    /// Provisioned quota in GiB, when the service reports one.
    pub quota_gb: Option<u32>,
    /// User metadata, with the header prefix stripped.
    pub metadata: Vec<(String, String)>,
}

impl ShareProperties {
    /// Assemble properties from a response header list.
    pub fn from_headers(headers: &[(String, String)]) -> Self {
        let metadata = headers
            .iter()
            .filter_map(|(n, v)| {
                let lower = n.to_ascii_lowercase();
                lower
                    .strip_prefix(METADATA_HEADER_PREFIX)
                    .map(|name| (name.to_string(), v.clone()))
            })
            .collect();
        Self {
            last_modified: header_value(headers, "last-modified").map(str::to_string),
            etag: header_value(headers, "etag").map(str::to_string),
            quota_gb: header_value(headers, "x-ms-share-quota").and_then(|v| v.parse().ok()),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn reads_standard_headers() {
        let props = ShareProperties::from_headers(&[
            h("Last-Modified", "Tue, 05 Aug 2026 10:00:00 GMT"),
            h("ETag", "\"0x8D4BCC2E4835CD0\""),
            h("x-ms-share-quota", "5"),
        ]);
        assert_eq!(
            props.last_modified.as_deref(),
            Some("Tue, 05 Aug 2026 10:00:00 GMT")
        );
        assert_eq!(props.etag.as_deref(), Some("\"0x8D4BCC2E4835CD0\""));
        assert_eq!(props.quota_gb, Some(5));
    }

    #[test]
    fn strips_metadata_prefix() {
        let props = ShareProperties::from_headers(&[
            h("x-ms-meta-owner", "ops"),
            h("X-Ms-Meta-Tier", "hot"),
            h("x-ms-version", "2014-02-14"),
        ]);
        assert_eq!(
            props.metadata,
            vec![
                ("owner".to_string(), "ops".to_string()),
                ("tier".to_string(), "hot".to_string()),
            ]
        );
    }

    #[test]
    fn missing_headers_stay_none() {
        let props = ShareProperties::from_headers(&[]);
        assert!(props.last_modified.is_none());
        assert!(props.etag.is_none());
        assert!(props.quota_gb.is_none());
        assert!(props.metadata.is_empty());
    }

    #[test]
    fn malformed_quota_is_ignored() {
        let props = ShareProperties::from_headers(&[h("x-ms-share-quota", "lots")]);
        assert!(props.quota_gb.is_none());
    }
}
