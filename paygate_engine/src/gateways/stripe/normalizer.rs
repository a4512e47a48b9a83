//! Response normalization for Stripe.
//!
//! Stripe returns flat objects named by `id`, with UNIX-second `created` timestamps. Failures look like
//! `{"error": {"type": ..., "code": ..., "message": ...}}`. A handful of codes say that the charge is in the wrong
//! state for the operation; those become [`GatewayError::InvalidStateTransition`].
use chrono::{DateTime, Utc};
use paygate_common::Amount;
use serde_json::Value;

use super::STRIPE_GATEWAY;
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

const STATE_TRANSITION_CODES: [&str; 4] =
    ["charge_already_captured", "charge_already_refunded", "charge_expired_for_capture", "charge_disputed"];

pub fn normalize_response(operation: Operation, response: &HttpResponse) -> Result<Transaction, GatewayError> {
    match classify_status(response.status) {
        StatusClass::Success => parse_success(operation, response.status, &response.body),
        _ => Err(parse_failure(response.status, &response.body)),
    }
}

fn parse_success(operation: Operation, status: u16, body: &[u8]) -> Result<Transaction, GatewayError> {
    let json = parse_json(body).ok_or_else(|| unreadable_success(status, body))?;
    let token = non_empty_str(&json, "id").ok_or_else(|| missing_token(status, "id"))?;
    let remote_status = non_empty_str(&json, "status");
    let captured = json.get("captured").and_then(Value::as_bool);
    let tx_status = match operation {
        Operation::Authorize | Operation::Purchase | Operation::Capture => {
            if remote_status == Some("failed") {
                let reason = non_empty_str(&json, "failure_code").unwrap_or("declined").to_string();
                let detail = non_empty_str(&json, "failure_message").map(String::from);
                return Err(GatewayError::ClientError { status, reason, detail });
            }
            match (operation, captured) {
                (_, Some(true)) => TransactionStatus::Captured,
                (_, Some(false)) | (Operation::Authorize, None) => TransactionStatus::Authorized,
                _ => TransactionStatus::Captured,
            }
        },
        Operation::Refund | Operation::Void => {
            if let Some(s @ ("failed" | "canceled")) = remote_status {
                let reason = non_empty_str(&json, "failure_reason").unwrap_or(s).to_string();
                return Err(GatewayError::ClientError { status, reason, detail: None });
            }
            if operation == Operation::Refund {
                TransactionStatus::Refunded
            } else {
                TransactionStatus::Voided
            }
        },
        Operation::Store => TransactionStatus::Stored,
        Operation::Unstore => {
            if json.get("deleted").and_then(Value::as_bool) != Some(true) {
                return Err(GatewayError::ProtocolError {
                    status,
                    reason: "Customer deletion was not confirmed by the gateway".to_string(),
                });
            }
            TransactionStatus::Unstored
        },
    };
    let created_at = json.get("created").and_then(Value::as_i64).and_then(|t| DateTime::<Utc>::from_timestamp(t, 0));
    let tx = Transaction::new(STRIPE_GATEWAY, token, tx_status)
        .with_captured(captured)
        .with_amount(json.get("amount").and_then(Value::as_i64).map(Amount::from))
        .with_currency(non_empty_str(&json, "currency"))
        .with_remote_status(remote_status)
        .with_created_at(created_at);
    Ok(tx)
}

fn parse_failure(status: u16, body: &[u8]) -> GatewayError {
    let error = parse_json(body).and_then(|j| j.get("error").filter(|e| e.is_object()).cloned());
    let Some(error) = error else {
        return failure_for_status(status, body_excerpt(body), None);
    };
    let reason = non_empty_str(&error, "code")
        .or_else(|| non_empty_str(&error, "type"))
        .map(String::from)
        .unwrap_or_else(|| body_excerpt(body));
    let detail = non_empty_str(&error, "message").map(String::from);
    let is_state_error = STATE_TRANSITION_CODES.contains(&reason.as_str());
    match failure_for_status(status, reason, detail) {
        GatewayError::ClientError { status, reason, detail } if is_state_error => {
            GatewayError::InvalidStateTransition { status, reason, detail }
        },
        other => other,
    }
}
