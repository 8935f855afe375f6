//! Error taxonomy for the file-share client.
//!
//! # Design
//! `Conflict` and `NotFound` get dedicated variants because the service
//! façade selectively converts them into boolean results; every other
//! server-reported failure lands in `Service` with the raw status, error
//! code and message. Validation failures (`InvalidArgument`) never reach the
//! wire, and network-level failures (`Transport`) are surfaced unchanged.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors returned by client operations.
#[derive(Error, Debug)]
pub enum ShareError {
    /// A required parameter was missing or empty.
    #[error("missing required argument: {0}")]
    InvalidArgument(&'static str),

    /// The share already exists (HTTP 409 / `ShareAlreadyExists`).
    #[error("share already exists: {message}")]
    Conflict { message: String },

    /// The share does not exist (HTTP 404 / `ShareNotFound`).
    #[error("share not found: {message}")]
    NotFound { message: String },

    /// Any other failure reported by the service.
    #[error("service error {status} {code}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    /// Network-level failure, surfaced unchanged.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A network-level failure produced by a [`Transport`] implementation.
///
/// Kept separate from [`ShareError`] so transports cannot fabricate
/// service-level conditions like `Conflict`.
///
/// [`Transport`]: crate::service::Transport
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ShareError {
    fn from(err: TransportError) -> Self {
        ShareError::Transport(err.0)
    }
}

/// Map a non-success response to a `ShareError`.
///
/// Prefers the error code carried in the XML body; falls back to the HTTP
/// status when the body is empty or unparseable.
pub fn classify_response(status: u16, body: &[u8]) -> ShareError {
    let (code, message) = parse_error_body(body).unwrap_or_default();
    match (status, code.as_str()) {
        (409, _) | (_, "ShareAlreadyExists") => ShareError::Conflict { message },
        (404, _) | (_, "ShareNotFound") => ShareError::NotFound { message },
        _ => ShareError::Service {
            status,
            code,
            message,
        },
    }
}

/// Extract `(code, message)` from a service error body:
/// `<Error><Code>…</Code><Message>…</Message></Error>`.
pub fn parse_error_body(body: &[u8]) -> Option<(String, String)> {
    let mut reader = Reader::from_reader(body);
    reader.trim_text(true);

    let mut code = None;
    let mut message = None;
    let mut current_element = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current_element = String::from_utf8_lossy(e.name().as_ref()).to_string();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().ok()?.to_string();
                match current_element.as_str() {
                    "Code" => code = Some(text),
                    "Message" => message = Some(text),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }

    Some((code?, message.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFLICT_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Error><Code>ShareAlreadyExists</Code><Message>The specified share already exists.</Message></Error>"#;

    #[test]
    fn parses_code_and_message() {
        let (code, message) = parse_error_body(CONFLICT_BODY.as_bytes()).unwrap();
        assert_eq!(code, "ShareAlreadyExists");
        assert_eq!(message, "The specified share already exists.");
    }

    #[test]
    fn classifies_conflict_by_code() {
        let err = classify_response(409, CONFLICT_BODY.as_bytes());
        assert!(matches!(err, ShareError::Conflict { .. }));
    }

    #[test]
    fn classifies_not_found_by_code() {
        let body = b"<Error><Code>ShareNotFound</Code><Message>The specified share does not exist.</Message></Error>";
        let err = classify_response(404, body);
        assert!(matches!(err, ShareError::NotFound { .. }));
    }

    #[test]
    fn falls_back_to_status_on_empty_body() {
        assert!(matches!(
            classify_response(409, b""),
            ShareError::Conflict { .. }
        ));
        assert!(matches!(
            classify_response(404, b""),
            ShareError::NotFound { .. }
        ));
    }

    #[test]
    fn unknown_codes_become_service_errors() {
        let body = b"<Error><Code>AuthenticationFailed</Code><Message>Signature mismatch.</Message></Error>";
        match classify_response(403, body) {
            ShareError::Service {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 403);
                assert_eq!(code, "AuthenticationFailed");
                assert_eq!(message, "Signature mismatch.");
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let err = classify_response(500, b"not xml at all");
        assert!(matches!(err, ShareError::Service { status: 500, .. }));
    }

    #[test]
    fn message_entities_are_unescaped() {
        let body = b"<Error><Code>InvalidQueryParameterValue</Code><Message>restype must be &quot;share&quot;</Message></Error>";
        let (_, message) = parse_error_body(body).unwrap();
        assert_eq!(message, "restype must be \"share\"");
    }
}
