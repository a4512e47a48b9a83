use std::{env, fmt::Display, str::FromStr};

use log::*;
use paygate_common::Amount;
use serde::{Deserialize, Serialize};

use crate::{
    errors::GatewayError,
    gateways::{
        pin::{PinConfig, PinGateway},
        stripe::{StripeConfig, StripeGateway},
    },
    traits::GatewayAdapter,
    transport::Transport,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    Pin,
    Stripe,
}

impl GatewayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Stripe => "stripe",
        }
    }
}

impl Display for GatewayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatewayKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pin" | "pinpayments" => Ok(Self::Pin),
            "stripe" => Ok(Self::Stripe),
            other => Err(GatewayError::ConfigError(format!("'{other}' is not a supported gateway. Use pin or stripe."))),
        }
    }
}

/// The configuration of whichever backend has been selected.
#[derive(Debug, Clone)]
pub enum GatewayConfig {
    Pin(PinConfig),
    Stripe(StripeConfig),
}

impl GatewayConfig {
    pub fn kind(&self) -> GatewayKind {
        match self {
            Self::Pin(_) => GatewayKind::Pin,
            Self::Stripe(_) => GatewayKind::Stripe,
        }
    }

    /// Reads the configuration for `kind` from the environment.
    pub fn for_kind_from_env(kind: GatewayKind) -> Self {
        match kind {
            GatewayKind::Pin => Self::Pin(PinConfig::from_env_or_default()),
            GatewayKind::Stripe => Self::Stripe(StripeConfig::from_env_or_default()),
        }
    }

    /// Selects a backend with `PAYGATE_GATEWAY` (Pin if unset) and reads its configuration from the environment.
    pub fn from_env_or_default() -> Result<Self, GatewayError> {
        let kind = match env::var("PAYGATE_GATEWAY") {
            Ok(s) => s.parse::<GatewayKind>()?,
            Err(_) => {
                warn!("🪛️ PAYGATE_GATEWAY is not set. Using the Pin Payments gateway.");
                GatewayKind::Pin
            },
        };
        info!("🪛️ Using the {kind} gateway");
        Ok(Self::for_kind_from_env(kind))
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        match self {
            Self::Pin(c) => c.validate(),
            Self::Stripe(c) => c.validate(),
        }
    }
}

/// A backend chosen at runtime. Delegates every operation to the concrete adapter.
#[derive(Debug)]
pub enum Gateway<T> {
    Pin(PinGateway<T>),
    Stripe(StripeGateway<T>),
}

impl<T: Transport> Gateway<T> {
    pub fn new(config: GatewayConfig, transport: T) -> Result<Self, GatewayError> {
        match config {
            GatewayConfig::Pin(c) => Ok(Self::Pin(PinGateway::new(c, transport)?)),
            GatewayConfig::Stripe(c) => Ok(Self::Stripe(StripeGateway::new(c, transport)?)),
        }
    }

    pub fn kind(&self) -> GatewayKind {
        match self {
            Self::Pin(_) => GatewayKind::Pin,
            Self::Stripe(_) => GatewayKind::Stripe,
        }
    }
}

impl<T: Transport> GatewayAdapter for Gateway<T> {
    fn gateway_name(&self) -> &'static str {
        match self {
            Self::Pin(g) => g.gateway_name(),
            Self::Stripe(g) => g.gateway_name(),
        }
    }

    async fn authorize(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &ChargeOptions,
    ) -> Result<Transaction, GatewayError> {
        match self {
            Self::Pin(g) => g.authorize(amount, source, options).await,
            Self::Stripe(g) => g.authorize(amount, source, options).await,
        }
    }

    async fn purchase(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &ChargeOptions,
    ) -> Result<Transaction, GatewayError> {
        match self {
            Self::Pin(g) => g.purchase(amount, source, options).await,
            Self::Stripe(g) => g.purchase(amount, source, options).await,
        }
    }

    async fn capture(&self, token: &str, amount: Amount, options: &CaptureOptions) -> Result<Transaction, GatewayError> {
        match self {
            Self::Pin(g) => g.capture(token, amount, options).await,
            Self::Stripe(g) => g.capture(token, amount, options).await,
        }
    }

    async fn refund(&self, amount: Amount, token: &str, options: &RefundOptions) -> Result<Transaction, GatewayError> {
        match self {
            Self::Pin(g) => g.refund(amount, token, options).await,
            Self::Stripe(g) => g.refund(amount, token, options).await,
        }
    }

    async fn store(&self, card: &Card, options: &StoreOptions) -> Result<Transaction, GatewayError> {
        match self {
            Self::Pin(g) => g.store(card, options).await,
            Self::Stripe(g) => g.store(card, options).await,
        }
    }

    async fn void(&self, token: &str, options: &VoidOptions) -> Result<Transaction, GatewayError> {
        match self {
            Self::Pin(g) => g.void(token, options).await,
            Self::Stripe(g) => g.void(token, options).await,
        }
    }

    async fn unstore(&self, token: &str) -> Result<Transaction, GatewayError> {
        match self {
            Self::Pin(g) => g.unstore(token).await,
            Self::Stripe(g) => g.unstore(token).await,
        }
    }
}
