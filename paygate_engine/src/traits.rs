use paygate_common::Amount;

use crate::{
    errors::GatewayError,
    types::{
        CaptureOptions,
        Card,
        ChargeOptions,
        PaymentSource,
        RefundOptions,
        StoreOptions,
        Transaction,
        VoidOptions,
    },
};

/// The uniform contract every payment gateway backend implements.
///
/// Each operation is one `build -> send -> normalize` pass: a pure request builder turns the canonical inputs into the
/// backend's parameters, the transport performs exactly one HTTP round trip, and the normalizer turns whatever came
/// back into a [`Transaction`] or a [`GatewayError`]. Implementations keep no state between calls, so a failed
/// `authorize` can never leave anything behind that affects a later `capture`, and concurrent calls are independent.
///
/// Expected failures (declines, bad input, timeouts, out-of-order transitions) are ordinary `Err` values. Nothing is
/// retried automatically, and business rules (capture amount, cumulative refunds) are left to the backend.
#[allow(async_fn_in_trait)]
pub trait GatewayAdapter {
    /// A stable, lowercase name for the backend, e.g. `pin`.
    fn gateway_name(&self) -> &'static str;

    /// Reserves `amount` without transferring it. The returned token must be captured (once) or voided.
    async fn authorize(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &ChargeOptions,
    ) -> Result<Transaction, GatewayError>;

    /// Authorizes and captures in a single remote step.
    async fn purchase(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &ChargeOptions,
    ) -> Result<Transaction, GatewayError>;

    /// Transfers previously authorized funds. `amount` may be less than the authorization; asking for more is
    /// rejected by the backend.
    async fn capture(&self, token: &str, amount: Amount, options: &CaptureOptions)
        -> Result<Transaction, GatewayError>;

    /// Refunds part or all of a captured charge. May be repeated until the cumulative total reaches the charge
    /// amount.
    async fn refund(&self, amount: Amount, token: &str, options: &RefundOptions) -> Result<Transaction, GatewayError>;

    /// Stores the card and returns a reusable token. No funds move. Storing the same card twice gives two tokens.
    async fn store(&self, card: &Card, options: &StoreOptions) -> Result<Transaction, GatewayError>;

    /// Releases an authorization that has not been captured.
    async fn void(&self, token: &str, options: &VoidOptions) -> Result<Transaction, GatewayError>;

    /// Deletes a token created by [`GatewayAdapter::store`].
    async fn unstore(&self, token: &str) -> Result<Transaction, GatewayError>;
}
