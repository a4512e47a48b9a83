//! The gateway backends.
//!
//! Each backend lives in its own module with the same four parts:
//! * `config`: the resolved credentials and endpoint, with `from_env_or_default()` for binaries.
//! * `builder`: pure functions from canonical inputs to an [`ApiCall`](crate::ApiCall).
//! * `normalizer`: pure functions from an [`HttpResponse`] to a `Transaction` or `GatewayError`.
//! * the adapter itself, which implements [`GatewayAdapter`](crate::GatewayAdapter) by chaining the three.
use log::*;

use crate::{
    errors::GatewayError,
    transport::{HttpRequest, HttpResponse, Transport},
    types::{Operation, Transaction},
};

pub mod pin;
pub mod stripe;

/// Performs the single transport round trip of an operation.
pub(crate) async fn round_trip<T: Transport>(
    transport: &T,
    gateway: &str,
    operation: Operation,
    request: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    debug!("💳️ {gateway} {operation}: {} {}", request.method, request.url);
    trace!("💳️ {gateway} {operation} parameters: {:?}", request.body);
    let response = transport.send(request).await.map_err(|e| {
        warn!("💳️ {gateway} {operation}: no response from the gateway. {e}");
        GatewayError::from(e)
    })?;
    trace!("💳️ {gateway} {operation}: HTTP {} ({} bytes)", response.status, response.body.len());
    Ok(response)
}

pub(crate) fn log_outcome(gateway: &str, operation: Operation, result: &Result<Transaction, GatewayError>) {
    match result {
        Ok(tx) => info!("💳️ {gateway} {operation} succeeded. Token: {}, status: {:?}", tx.token, tx.status),
        Err(e @ GatewayError::ProtocolError { .. }) => error!("💳️ {gateway} {operation} failed. {e}"),
        Err(e) => warn!("💳️ {gateway} {operation} failed. {e}"),
    }
}
