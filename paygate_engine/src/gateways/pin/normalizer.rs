//! Response normalization for Pin Payments.
//!
//! Successful responses wrap the record in a `response` envelope and name it with `response.token`. Failures carry
//! the reason code in `error`, a sentence in `error_description` and, for validation failures (HTTP 422), a
//! `messages` list. Pin does not flag out-of-order operations (capturing twice and so on) with a dedicated code, so
//! those surface as plain client errors.
use chrono::{DateTime, Utc};
use paygate_common::Amount;
use serde_json::Value;

use super::PIN_GATEWAY;
use crate::{
    errors::GatewayError,
    normalize::{
        body_excerpt,
        classify_status,
        failure_for_status,
        missing_token,
        non_empty_str,
        parse_json,
        unreadable_success,
        StatusClass,
    },
    transport::HttpResponse,
    types::{Operation, Transaction, TransactionStatus},
};

pub fn normalize_response(operation: Operation, response: &HttpResponse) -> Result<Transaction, GatewayError> {
    match classify_status(response.status) {
        StatusClass::Success => parse_success(operation, response.status, &response.body),
        _ => Err(parse_failure(response.status, &response.body)),
    }
}

/// Pin answers a customer deletion with `204 No Content`, so the result is named after the token that was deleted.
pub fn normalize_unstore(token: &str, response: &HttpResponse) -> Result<Transaction, GatewayError> {
    match classify_status(response.status) {
        StatusClass::Success => Ok(Transaction::new(PIN_GATEWAY, token, TransactionStatus::Unstored)),
        _ => Err(parse_failure(response.status, &response.body)),
    }
}

fn parse_success(operation: Operation, status: u16, body: &[u8]) -> Result<Transaction, GatewayError> {
    let json = parse_json(body).ok_or_else(|| unreadable_success(status, body))?;
    let record = json.get("response").filter(|r| r.is_object()).ok_or_else(|| GatewayError::ProtocolError {
        status,
        reason: "Successful response has no 'response' object".to_string(),
    })?;
    if record.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = non_empty_str(record, "error_message").unwrap_or("declined").to_string();
        let detail = non_empty_str(record, "status_message").map(String::from);
        return Err(GatewayError::ClientError { status, reason, detail });
    }
    let token = non_empty_str(record, "token").ok_or_else(|| missing_token(status, "response.token"))?;
    let captured = record.get("captured").and_then(Value::as_bool);
    let tx_status = match (operation, captured) {
        (Operation::Authorize | Operation::Purchase | Operation::Capture, Some(true)) => TransactionStatus::Captured,
        (Operation::Authorize | Operation::Purchase | Operation::Capture, Some(false)) => TransactionStatus::Authorized,
        (Operation::Authorize, None) => TransactionStatus::Authorized,
        (Operation::Purchase | Operation::Capture, None) => TransactionStatus::Captured,
        (Operation::Refund, _) => TransactionStatus::Refunded,
        (Operation::Void, _) => TransactionStatus::Voided,
        (Operation::Store, _) => TransactionStatus::Stored,
        (Operation::Unstore, _) => TransactionStatus::Unstored,
    };
    let created_at = non_empty_str(record, "created_at")
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc));
    let tx = Transaction::new(PIN_GATEWAY, token, tx_status)
        .with_captured(captured)
        .with_amount(record.get("amount").and_then(Value::as_i64).map(Amount::from))
        .with_currency(non_empty_str(record, "currency"))
        .with_remote_status(non_empty_str(record, "status_message"))
        .with_created_at(created_at);
    Ok(tx)
}

fn parse_failure(status: u16, body: &[u8]) -> GatewayError {
    let json = parse_json(body);
    let reason = json
        .as_ref()
        .and_then(|j| non_empty_str(j, "error"))
        .map(String::from)
        .unwrap_or_else(|| body_excerpt(body));
    let detail = json.as_ref().and_then(describe_error);
    failure_for_status(status, reason, detail)
}

/// Collects `error_description` and any per-field `messages` into one line.
fn describe_error(json: &Value) -> Option<String> {
    let mut parts = vec![];
    if let Some(description) = non_empty_str(json, "error_description") {
        parts.push(description.to_string());
    }
    if let Some(messages) = json.get("messages").and_then(Value::as_array) {
        parts.extend(messages.iter().filter_map(|m| non_empty_str(m, "message")).map(String::from));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
