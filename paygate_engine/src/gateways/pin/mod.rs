//! Pin Payments (<https://pinpayments.com/developers/api-reference>).
//!
//! Authentication is HTTP Basic with the secret API key as the username and an empty password.
pub mod builder;
mod config;
pub mod normalizer;

use std::fmt::{Debug, Formatter};

pub use config::{PinConfig, PIN_LIVE_URL, PIN_TEST_URL};
use paygate_common::Amount;

use crate::{
    errors::GatewayError,
    gateways::{log_outcome, round_trip},
    helpers::basic_auth,
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

pub const PIN_GATEWAY: &str = "pin";

pub struct PinGateway<T> {
    config: PinConfig,
    transport: T,
}

impl<T> Debug for PinGateway<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PinGateway({})", self.config.base_url)
    }
}

impl<T: Transport> PinGateway<T> {
    /// Creates the adapter. Fails with [`GatewayError::ConfigError`] before anything is sent if the configuration is
    /// unusable.
    pub fn new(config: PinConfig, transport: T) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, call: ApiCall) -> HttpRequest {
        let ApiCall { method, path, params, .. } = call;
        let request = HttpRequest::new(method, self.config.url(&path))
            .with_authorization(basic_auth(&self.config.api_key, ""));
        if params.is_empty() {
            request
        } else {
            request.with_body(params)
        }
    }

    async fn execute(&self, operation: Operation, call: ApiCall) -> Result<Transaction, GatewayError> {
        let request = self.request(call);
        let result = match round_trip(&self.transport, PIN_GATEWAY, operation, request).await {
            Ok(response) => normalizer::normalize_response(operation, &response),
            Err(e) => Err(e),
        };
        self.finish(operation, result)
    }

    fn finish(
        &self,
        operation: Operation,
        result: Result<Transaction, GatewayError>,
    ) -> Result<Transaction, GatewayError> {
        let result = result.map_err(|e| e.scrub(&self.config.api_key));
        log_outcome(PIN_GATEWAY, operation, &result);
        result
    }
}

impl<T: Transport> GatewayAdapter for PinGateway<T> {
    fn gateway_name(&self) -> &'static str {
        PIN_GATEWAY
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

    async fn capture(
        &self,
        token: &str,
        amount: Amount,
        _options: &CaptureOptions,
    ) -> Result<Transaction, GatewayError> {
        self.execute(Operation::Capture, builder::build_capture(token, amount)).await
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
        let request = self.request(builder::build_unstore(token));
        let result = match round_trip(&self.transport, PIN_GATEWAY, Operation::Unstore, request).await {
            Ok(response) => normalizer::normalize_unstore(token, &response),
            Err(e) => Err(e),
        };
        self.finish(Operation::Unstore, result)
    }
}
