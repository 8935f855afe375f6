//! Immutable client configuration.
//!
//! # Design
//! All connection parameters — account, key, protocol, hosts, timeout — are
//! fixed when a [`ClientConfig`] is constructed and shared read-only by every
//! operation issued through it. The account key is base64-decoded once here
//! so signing later in the request path is infallible.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::ShareError;

/// Production host suffix; the account name is prepended to form the host.
pub const FILE_SHARE_SERVICE_HOST_BASE: &str = ".file.core.windows.net";

/// Local-development emulator endpoint.
pub const DEV_FILE_SHARE_HOST: &str = "127.0.0.1:10004";

/// Default timeout handed to the transport, in line with the service's own
/// server-side cap.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(65);

/// Well-known local-development account name.
pub const DEV_STORE_ACCOUNT: &str = "devstoreaccount1";

/// Well-known local-development account key.
pub const DEV_STORE_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

/// API version stamped on every request as `x-ms-version`.
pub const SERVICE_VERSION: &str = "2015-02-21";

/// Connection parameters for one storage account.
///
/// Constructed once, never mutated; `FileShareClient` and the service façade
/// only ever read from it, so a single config is safely shared by concurrent
/// callers.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    account_name: String,
    account_key: Vec<u8>,
    protocol: String,
    host_base: String,
    dev_host: String,
    timeout: Duration,
    use_local_storage: bool,
}

impl ClientConfig {
    /// Production configuration for `account_name` authenticated with the
    /// base64-encoded `account_key`.
    pub fn new(account_name: &str, account_key: &str) -> Result<Self, ShareError> {
        if account_name.is_empty() {
            return Err(ShareError::InvalidArgument("account_name"));
        }
        if account_key.is_empty() {
            return Err(ShareError::InvalidArgument("account_key"));
        }
        let key = BASE64
            .decode(account_key)
            .map_err(|_| ShareError::InvalidArgument("account_key"))?;
        Ok(Self {
            account_name: account_name.to_string(),
            account_key: key,
            protocol: "https".to_string(),
            host_base: FILE_SHARE_SERVICE_HOST_BASE.to_string(),
            dev_host: DEV_FILE_SHARE_HOST.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            use_local_storage: false,
        })
    }

    /// Configuration for the local-development emulator, using the
    /// well-known development account over plain HTTP.
    pub fn development() -> Self {
        let mut config = Self::new(DEV_STORE_ACCOUNT, DEV_STORE_ACCOUNT_KEY)
            .expect("development credentials are well-formed");
        config.protocol = "http".to_string();
        config.use_local_storage = true;
        config
    }

    /// Override the protocol (`http` / `https`).
    pub fn with_protocol(mut self, protocol: &str) -> Self {
        self.protocol = protocol.to_string();
        self
    }

    /// Override the production host suffix, for on-premise deployments.
    pub fn with_host_base(mut self, host_base: &str) -> Self {
        self.host_base = host_base.to_string();
        self
    }

    /// Override the local-development host (`host:port`).
    pub fn with_dev_host(mut self, dev_host: &str) -> Self {
        self.dev_host = dev_host.to_string();
        self
    }

    /// Override the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Decoded signing key bytes.
    pub fn account_key(&self) -> &[u8] {
        &self.account_key
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether requests target the local-development emulator, which expects
    /// the account name as the first path segment.
    pub fn use_local_storage(&self) -> bool {
        self.use_local_storage
    }

    /// Host for the next request: `{account}{host_base}` in production, the
    /// emulator address in development.
    pub fn host(&self) -> String {
        if self.use_local_storage {
            self.dev_host.clone()
        } else {
            format!("{}{}", self.account_name, self.host_base)
        }
    }
}
