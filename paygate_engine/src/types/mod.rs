//! The canonical vocabulary shared by every gateway adapter.
//!
//! Everything in here is transient: values are built per call and nothing is persisted by the engine. The only
//! durable identity is the token a gateway returns inside a [`Transaction`], which the caller stores.
mod card;
mod options;
mod transaction;

pub use card::{Address, Card, PaymentSource};
pub use options::{CaptureOptions, ChargeOptions, RefundOptions, StoreOptions, VoidOptions};
pub use transaction::{Operation, Transaction, TransactionStatus};
