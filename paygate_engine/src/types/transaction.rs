use std::fmt::Display;

use chrono::{DateTime, Utc};
use paygate_common::Amount;
use serde::Serialize;

/// The operations every adapter supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Authorize,
    Purchase,
    Capture,
    Refund,
    Void,
    Store,
    Unstore,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorize => "authorize",
            Self::Purchase => "purchase",
            Self::Capture => "capture",
            Self::Refund => "refund",
            Self::Void => "void",
            Self::Store => "store",
            Self::Unstore => "unstore",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the transaction named by a token stands after a successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Funds are reserved, awaiting capture.
    Authorized,
    Captured,
    /// The token names a refund record.
    Refunded,
    /// The authorization was released without capture.
    Voided,
    /// The token names a stored customer or card. No funds moved.
    Stored,
    /// The stored customer or card was deleted.
    Unstored,
}

/// The success half of every adapter operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Name of the gateway that produced the transaction, e.g. `pin`.
    pub gateway: String,
    /// The gateway's reference for the charge, refund or customer. Use it to chain `capture`, `refund` or `void`.
    pub token: String,
    pub status: TransactionStatus,
    /// Whether the gateway reported the charge as captured. `None` when the response does not say.
    pub captured: Option<bool>,
    pub amount: Option<Amount>,
    /// Upper-case ISO 4217 code, whatever case the gateway used.
    pub currency: Option<String>,
    /// The gateway's own status text, kept for diagnostics.
    pub remote_status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(gateway: &str, token: &str, status: TransactionStatus) -> Self {
        Self {
            gateway: gateway.to_string(),
            token: token.to_string(),
            status,
            captured: None,
            amount: None,
            currency: None,
            remote_status: None,
            created_at: None,
        }
    }

    pub fn with_captured(mut self, captured: Option<bool>) -> Self {
        self.captured = captured;
        self
    }

    pub fn with_amount(mut self, amount: Option<Amount>) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_currency(mut self, currency: Option<&str>) -> Self {
        self.currency = currency.map(|c| c.to_ascii_uppercase());
        self
    }

    pub fn with_remote_status(mut self, remote_status: Option<&str>) -> Self {
        self.remote_status = remote_status.map(String::from);
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_captured(&self) -> bool {
        self.captured.unwrap_or(self.status == TransactionStatus::Captured)
    }
}
