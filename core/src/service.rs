//! Service façade: one method per remote share operation.
//!
//! # Design
//! [`FileShareService`] pairs the stateless [`FileShareClient`] with a
//! caller-supplied [`Transport`] and gives each operation its documented
//! failure-suppression policy: with the suppression flag unset, a `Conflict`
//! on create (or `NotFound` on delete) is converted into `Ok(false)` instead
//! of an error, so callers can express "ensure the share exists / is gone"
//! without matching on error variants themselves. Everything else — one
//! blocking round trip per call, no retries, no shared mutable state — stays
//! with the transport.

use std::time::Duration;

use crate::client::FileShareClient;
use crate::config::ClientConfig;
use crate::error::{ShareError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ShareProperties;

/// Executes one HTTP round trip.
///
/// Implementations must return server responses of any status as
/// `Ok(HttpResponse)`; `Err` is reserved for network-level failures. The
/// configured timeout is passed through unchanged — no retries are expected
/// on either side of this boundary.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;
}

/// Client-facing façade over the share operations.
pub struct FileShareService<T> {
    client: FileShareClient,
    transport: T,
}

impl<T: Transport> FileShareService<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: FileShareClient::new(config),
            transport,
        }
    }

    /// The underlying request builder, for callers doing their own I/O.
    pub fn client(&self) -> &FileShareClient {
        &self.client
    }

    /// Create `share_name`.
    ///
    /// Returns `Ok(true)` when the share was newly created. When
    /// `fail_on_exist` is unset, an existing share yields `Ok(false)`
    /// instead of [`ShareError::Conflict`]; all other failures propagate
    /// either way.
    pub fn create_share(&self, share_name: &str, fail_on_exist: bool) -> Result<bool, ShareError> {
        let request = self.client.build_create_share(share_name)?;
        log::debug!("PUT share {share_name}");
        let response = self.submit(request)?;
        match self.client.parse_create_share(response) {
            Ok(()) => Ok(true),
            Err(ShareError::Conflict { .. }) if !fail_on_exist => {
                log::debug!("share {share_name} already exists");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Delete `share_name`.
    ///
    /// Returns `Ok(true)` when the share was deleted. When `fail_not_exist`
    /// is unset, a missing share yields `Ok(false)` instead of
    /// [`ShareError::NotFound`]; all other failures propagate either way.
    pub fn delete_share(
        &self,
        share_name: &str,
        fail_not_exist: bool,
    ) -> Result<bool, ShareError> {
        let request = self.client.build_delete_share(share_name)?;
        log::debug!("DELETE share {share_name}");
        let response = self.submit(request)?;
        match self.client.parse_delete_share(response) {
            Ok(()) => Ok(true),
            Err(ShareError::NotFound { .. }) if !fail_not_exist => {
                log::debug!("share {share_name} does not exist");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch the properties of `share_name`.
    pub fn get_share_properties(&self, share_name: &str) -> Result<ShareProperties, ShareError> {
        let request = self.client.build_get_share_properties(share_name)?;
        log::debug!("GET share {share_name} properties");
        let response = self.submit(request)?;
        self.client.parse_get_share_properties(response)
    }

    fn submit(&self, request: HttpRequest) -> Result<HttpResponse, ShareError> {
        let timeout = self.client.config().timeout();
        Ok(self.transport.execute(request, timeout)?)
    }
}
