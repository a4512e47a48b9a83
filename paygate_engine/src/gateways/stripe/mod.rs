//! Stripe (<https://docs.stripe.com/api>), using the Charges, Refunds and Customers APIs.
//!
//! Authentication is a bearer token holding the secret key.
pub mod builder;
mod config;
pub mod normalizer;

use std::fmt::{Debug, Formatter};

pub use config::{StripeConfig, STRIPE_URL};
use paygate_common::Amount;

use crate::{
    errors::GatewayError,
    gateways::{log_outcome, round_trip},
    helpers::bearer_auth,
    params::ApiCall,
    traits::GatewayAdapter,
    transport::{HttpRequest, Transport},
    types::{
        CaptureOptions,
        Card,
        ChargeOptions,
        Operation,
        PaymentSource,
        RefundOptions,
        StoreOptions,
        Transaction,
        VoidOptions,
    },
};

pub const STRIPE_GATEWAY: &str = "stripe";

pub struct StripeGateway<T> {
    config: StripeConfig,
    transport: T,
}

impl<T> Debug for StripeGateway<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "StripeGateway({})", self.config.base_url)
    }
}

impl<T: Transport> StripeGateway<T> {
    pub fn new(config: StripeConfig, transport: T) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, call: ApiCall) -> HttpRequest {
        let ApiCall { method, path, params, idempotency_key } = call;
        let mut request = HttpRequest::new(method, self.config.url(&path))
            .with_authorization(bearer_auth(&self.config.secret_key));
        if let Some(key) = idempotency_key {
            request = request.with_header("Idempotency-Key", key);
        }
        if !params.is_empty() {
            request = request.with_body(params);
        }
        request
    }

    async fn execute(&self, operation: Operation, call: ApiCall) -> Result<Transaction, GatewayError> {
        let request = self.request(call);
        let result = match round_trip(&self.transport, STRIPE_GATEWAY, operation, request).await {
            Ok(response) => normalizer::normalize_response(operation, &response),
            Err(e) => Err(e),
        }
        .map_err(|e| e.scrub(&self.config.secret_key));
        log_outcome(STRIPE_GATEWAY, operation, &result);
        result
    }
}

impl<T: Transport> GatewayAdapter for StripeGateway<T> {
    fn gateway_name(&self) -> &'static str {
        STRIPE_GATEWAY
    }

    async fn authorize(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &ChargeOptions,
    ) -> Result<Transaction, GatewayError> {
        let call = builder::build_auth_or_purchase(amount, source, options, false, &self.config.default_currency);
        self.execute(Operation::Authorize, call).await
    }

    async fn purchase(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &ChargeOptions,
    ) -> Result<Transaction, GatewayError> {
        let call = builder::build_auth_or_purchase(amount, source, options, true, &self.config.default_currency);
        self.execute(Operation::Purchase, call).await
    }

    async fn capture(&self, token: &str, amount: Amount, options: &CaptureOptions) -> Result<Transaction, GatewayError> {
        let call = builder::build_capture(token, amount, options.order_id.as_deref());
        self.execute(Operation::Capture, call).await
    }

    async fn refund(&self, amount: Amount, token: &str, options: &RefundOptions) -> Result<Transaction, GatewayError> {
        self.execute(Operation::Refund, builder::build_refund(token, amount, options)).await
    }

    async fn store(&self, card: &Card, options: &StoreOptions) -> Result<Transaction, GatewayError> {
        self.execute(Operation::Store, builder::build_store(card, options)).await
    }

    async fn void(&self, token: &str, options: &VoidOptions) -> Result<Transaction, GatewayError> {
        self.execute(Operation::Void, builder::build_void(token, options)).await
    }

    async fn unstore(&self, token: &str) -> Result<Transaction, GatewayError> {
        self.execute(Operation::Unstore, builder::build_unstore(token)).await
    }
}
