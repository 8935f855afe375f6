//! Synchronous client core for a cloud file-share storage service.
//!
//! # Overview
//! Builds signed `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). The caller executes
//! the actual HTTP round-trip — either directly against the `build_*` /
//! `parse_*` pairs on [`FileShareClient`], or through the
//! [`FileShareService`] façade with any [`Transport`] implementation.
//!
//! # Design
//! - [`ClientConfig`] is immutable once constructed; every operation reads
//!   it, none mutate it.
//! - Each share operation is split into `build_*` (produces a signed
//!   request) and `parse_*` (consumes a response), so the I/O boundary is
//!   explicit and the core stays deterministic.
//! - The façade converts `Conflict` / `NotFound` into boolean results when
//!   the caller opts out of failing on them; no retries, no caching.
//! - Wire shapes (paths, headers, XML error bodies, Shared Key signing) are
//!   dictated by the remote service; the mock-server crate emulates them for
//!   integration tests.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod types;

pub use client::FileShareClient;
pub use config::ClientConfig;
pub use error::{ShareError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{FileShareService, Transport};
pub use types::ShareProperties;
