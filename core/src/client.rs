//! Stateless request builder and response parser for share operations.
//!
//! # Design
//! `FileShareClient` holds only the immutable [`ClientConfig`] and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces a signed [`HttpRequest`] and a `parse_*` method that
//! consumes an [`HttpResponse`]. The caller executes the actual HTTP
//! round-trip (see [`FileShareService`] for the ready-made façade), keeping
//! this layer deterministic and free of I/O dependencies.
//!
//! [`FileShareService`]: crate::service::FileShareService

use uuid::Uuid;

use crate::auth;
use crate::config::{ClientConfig, SERVICE_VERSION};
use crate::error::{classify_response, ShareError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::ShareProperties;

/// Builds and interprets share-level requests without touching the network.
#[derive(Debug, Clone)]
pub struct FileShareClient {
    config: ClientConfig,
}

impl FileShareClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// PUT request creating `share_name`.
    pub fn build_create_share(&self, share_name: &str) -> Result<HttpRequest, ShareError> {
        self.build_share_request(share_name, HttpMethod::Put)
    }

    /// DELETE request removing `share_name`.
    pub fn build_delete_share(&self, share_name: &str) -> Result<HttpRequest, ShareError> {
        self.build_share_request(share_name, HttpMethod::Delete)
    }

    /// GET request fetching the properties of `share_name`.
    pub fn build_get_share_properties(&self, share_name: &str) -> Result<HttpRequest, ShareError> {
        self.build_share_request(share_name, HttpMethod::Get)
    }

    pub fn parse_create_share(&self, response: HttpResponse) -> Result<(), ShareError> {
        check_status(&response, 201)
    }

    pub fn parse_delete_share(&self, response: HttpResponse) -> Result<(), ShareError> {
        check_status(&response, 202)
    }

    pub fn parse_get_share_properties(
        &self,
        response: HttpResponse,
    ) -> Result<ShareProperties, ShareError> {
        check_status(&response, 200)?;
        Ok(ShareProperties::from_headers(&response.headers))
    }

    /// Shared construction path for all share-scoped requests: resource
    /// addressing, local-storage rewriting, service headers, signature.
    fn build_share_request(
        &self,
        share_name: &str,
        method: HttpMethod,
    ) -> Result<HttpRequest, ShareError> {
        if share_name.is_empty() {
            return Err(ShareError::InvalidArgument("share_name"));
        }

        // The emulator multiplexes accounts on one endpoint, so the account
        // name becomes the first path segment there.
        let path = if self.config.use_local_storage() {
            format!("/{}/{}", self.config.account_name(), share_name)
        } else {
            format!("/{share_name}")
        };

        let mut headers = vec![
            ("x-ms-version".to_string(), SERVICE_VERSION.to_string()),
            ("x-ms-date".to_string(), rfc1123_now()),
            (
                "x-ms-client-request-id".to_string(),
                Uuid::new_v4().to_string(),
            ),
        ];
        if method == HttpMethod::Put {
            headers.push(("content-length".to_string(), "0".to_string()));
        }

        let mut request = HttpRequest {
            method,
            host: self.config.host(),
            path,
            query: vec![("restype".to_string(), "share".to_string())],
            headers,
            body: None,
        };
        auth::sign_request(
            &mut request,
            self.config.account_name(),
            self.config.account_key(),
        );
        Ok(request)
    }
}

/// Map non-expected status codes to the appropriate `ShareError`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ShareError> {
    if response.status == expected {
        return Ok(());
    }
    Err(classify_response(response.status, &response.body))
}

/// Current time in the RFC 1123 form the `x-ms-date` header requires.
fn rfc1123_now() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
