//! Paygate Engine
//!
//! Paygate lets a caller authorize, purchase, capture, refund and store cards against several independent payment
//! gateways through one contract, even though every gateway has its own wire format, field names, authentication
//! scheme and error vocabulary.
//!
//! The library is organised around three pieces:
//! 1. The canonical vocabulary ([`mod@types`]): amounts, cards, per-operation options and the normalized
//!    [`Transaction`] / [`GatewayError`] result pair returned by every operation.
//! 2. The [`GatewayAdapter`] trait. Each backend implements it once, as a straight composition of a pure request
//!    builder, a single [`Transport`] round trip and a response normalizer. Adapters keep no state between calls.
//! 3. The backends themselves ([`mod@gateways`]). Pin Payments and Stripe are provided; the [`Gateway`] registry
//!    picks one from configuration.
//!
//! HTTP is an external collaborator: anything implementing [`Transport`] can carry requests. [`ReqwestTransport`] is
//! the default. Credentials arrive already resolved, inside the backend configuration objects.
mod errors;
pub mod gateways;
pub mod helpers;
mod normalize;
mod params;
mod registry;
mod traits;
mod transport;
pub mod types;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;


pub use errors::{ErrorKind, GatewayError};
pub use gateways::{
    pin::{PinConfig, PinGateway},
    stripe::{StripeConfig, StripeGateway},
};
pub use normalize::{classify_status, StatusClass};
pub use params::{ApiCall, ParamSet};
pub use paygate_common::{Amount, Secret};
pub use registry::{Gateway, GatewayConfig, GatewayKind};
pub use traits::GatewayAdapter;
pub use transport::{
    reqwest_transport::{ReqwestTransport, TransportConfig},
    HttpRequest,
    HttpResponse,
    Method,
    Transport,
    TransportError,
};
pub use types::{
    Address,
    Card,
    CaptureOptions,
    ChargeOptions,
    Operation,
    PaymentSource,
    RefundOptions,
    StoreOptions,
    Transaction,
    TransactionStatus,
    VoidOptions,
};
