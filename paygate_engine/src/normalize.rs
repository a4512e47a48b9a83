//! Backend-independent building blocks for the response normalizers.
//!
//! Every backend normalizer first classifies the status code with [`classify_status`], then applies its own body
//! rules. Between them they are total: any `u16` status with any body (empty, truncated, HTML, binary) ends in
//! exactly one `Ok(Transaction)` or `Err(GatewayError)`, and nothing here can panic.
use serde_json::Value;

use crate::errors::GatewayError;

/// How long raw bodies may get before they are cut when used as an error reason.
const MAX_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx. Still has to pass body checks before it counts as a success.
    Success,
    /// 4xx other than 408 and 429. The request itself was at fault.
    Client,
    /// 408, 429 and 5xx. Worth retrying later.
    Transient,
    /// 1xx, 3xx and anything outside 100..=599. Gateways never send these on purpose.
    Unexpected,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        408 | 429 => StatusClass::Transient,
        400..=499 => StatusClass::Client,
        500..=599 => StatusClass::Transient,
        _ => StatusClass::Unexpected,
    }
}

/// Parses the body as JSON. Empty and malformed bodies both give `None`.
pub fn parse_json(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice::<Value>(body).ok()
}

/// A short, printable rendering of a raw body for use as a failure reason.
pub fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "<empty body>".to_string();
    }
    let mut excerpt = text.chars().take(MAX_EXCERPT_CHARS).collect::<String>();
    if text.chars().count() > MAX_EXCERPT_CHARS {
        excerpt.push('…');
    }
    excerpt
}

/// Reads a non-empty string field.
pub fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

/// The failure for a non-2xx status, once the backend has pulled a reason (and maybe a detail) out of the body.
pub fn failure_for_status(status: u16, reason: String, detail: Option<String>) -> GatewayError {
    match classify_status(status) {
        StatusClass::Client => GatewayError::ClientError { status, reason, detail },
        StatusClass::Transient => GatewayError::TransientError { status: Some(status), reason },
        StatusClass::Success | StatusClass::Unexpected => {
            let reason = match detail {
                Some(d) => format!("Unexpected HTTP status {status}. {reason}. {d}"),
                None => format!("Unexpected HTTP status {status}. {reason}"),
            };
            GatewayError::ProtocolError { status, reason }
        },
    }
}

/// A 2xx whose body could not be parsed. The reply was damaged on the way (or cut short), so the outcome of the
/// operation is unknown; the caller decides whether to query or retry.
pub fn unreadable_success(status: u16, body: &[u8]) -> GatewayError {
    GatewayError::TransientError {
        status: Some(status),
        reason: format!("Could not parse the gateway's response. {}", body_excerpt(body)),
    }
}

/// A 2xx that parsed but lacks the token that names the transaction. Such a success is not trusted.
pub fn missing_token(status: u16, field: &str) -> GatewayError {
    GatewayError::ProtocolError { status, reason: format!("Successful response has no usable '{field}' field") }
}
