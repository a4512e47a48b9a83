use paygate_common::Secret;
use serde::Serialize;
use thiserror::Error;

use crate::transport::TransportError;

/// The coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Bad request data or a declined card. Not retryable without changing the input.
    ClientError,
    /// A client error where the gateway said explicitly that the transaction is in the wrong state for the
    /// operation (capturing twice, refunding an uncaptured charge and so on).
    InvalidStateTransition,
    /// Network trouble, timeouts, rate limiting or a 5xx. Retryable under the caller's own policy.
    TransientError,
    /// The gateway answered in a way that breaks its own contract, e.g. a success status without a token.
    ProtocolError,
    /// Missing or invalid credentials/configuration, detected before any request is sent.
    ConfigError,
}

impl ErrorKind {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ClientError | Self::InvalidStateTransition)
    }
}

/// The failure half of every adapter operation.
///
/// Each variant carries what the caller needs to diagnose the failure: the HTTP status (when a response was
/// received), the gateway's raw reason code and, when the gateway provides one, a longer description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("The gateway rejected the request (HTTP {status}): {reason}")]
    ClientError { status: u16, reason: String, detail: Option<String> },
    #[error("The transaction is not in a valid state for this operation (HTTP {status}): {reason}")]
    InvalidStateTransition { status: u16, reason: String, detail: Option<String> },
    #[error("Transient gateway failure: {reason}")]
    TransientError { status: Option<u16>, reason: String },
    #[error("The gateway response violates its contract (HTTP {status}): {reason}")]
    ProtocolError { status: u16, reason: String },
    #[error("Invalid gateway configuration: {0}")]
    ConfigError(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientError { .. } => ErrorKind::ClientError,
            Self::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
            Self::TransientError { .. } => ErrorKind::TransientError,
            Self::ProtocolError { .. } => ErrorKind::ProtocolError,
            Self::ConfigError(_) => ErrorKind::ConfigError,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } |
            Self::InvalidStateTransition { status, .. } |
            Self::ProtocolError { status, .. } => Some(*status),
            Self::TransientError { status, .. } => *status,
            Self::ConfigError(_) => None,
        }
    }

    /// The gateway's raw reason code (e.g. `card_declined`), or a short description for locally detected failures.
    pub fn reason(&self) -> &str {
        match self {
            Self::ClientError { reason, .. } |
            Self::InvalidStateTransition { reason, .. } |
            Self::TransientError { reason, .. } |
            Self::ProtocolError { reason, .. } => reason.as_str(),
            Self::ConfigError(reason) => reason.as_str(),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::ClientError { detail, .. } | Self::InvalidStateTransition { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::TransientError
    }

    /// Removes every verbatim occurrence of `secret` from the reason and detail.
    pub fn scrub(self, secret: &Secret<String>) -> Self {
        let clean = |s: String| secret.scrub(&s);
        match self {
            Self::ClientError { status, reason, detail } => {
                Self::ClientError { status, reason: clean(reason), detail: detail.map(clean) }
            },
            Self::InvalidStateTransition { status, reason, detail } => {
                Self::InvalidStateTransition { status, reason: clean(reason), detail: detail.map(clean) }
            },
            Self::TransientError { status, reason } => Self::TransientError { status, reason: clean(reason) },
            Self::ProtocolError { status, reason } => Self::ProtocolError { status, reason: clean(reason) },
            Self::ConfigError(reason) => Self::ConfigError(clean(reason)),
        }
    }
}

impl From<TransportError> for GatewayError {
    fn from(e: TransportError) -> Self {
        match e {
            // Nothing left the process, and the same input would be rejected again.
            TransportError::InvalidRequest(_) => Self::ConfigError(e.to_string()),
            _ => Self::TransientError { status: None, reason: e.to_string() },
        }
    }
}
