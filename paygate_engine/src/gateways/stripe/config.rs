use std::env;

use log::*;
use paygate_common::Secret;

use crate::{
    errors::GatewayError,
    helpers::{join_url, validate_credentials},
};

pub const STRIPE_URL: &str = "https://api.stripe.com/v1";
const DEFAULT_STRIPE_CURRENCY: &str = "usd";

/// Resolved credentials and endpoint for Stripe. Test and live mode are selected by the key itself.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// The secret key (`sk_test_...` or `sk_live_...`). Sent as a bearer token.
    pub secret_key: Secret<String>,
    pub default_currency: String,
    pub base_url: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: Secret::default(),
            default_currency: DEFAULT_STRIPE_CURRENCY.to_string(),
            base_url: STRIPE_URL.to_string(),
        }
    }
}

impl StripeConfig {
    pub fn new(secret_key: &str) -> Self {
        Self { secret_key: Secret::from(secret_key), ..Default::default() }
    }

    pub fn with_default_currency(mut self, currency: &str) -> Self {
        self.default_currency = currency.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn from_env_or_default() -> Self {
        let secret_key = env::var("PAYGATE_STRIPE_SECRET_KEY").ok().unwrap_or_else(|| {
            error!("🪛️ PAYGATE_STRIPE_SECRET_KEY is not set. Please set it to your Stripe secret key.");
            String::default()
        });
        if secret_key.starts_with("sk_live_") {
            warn!("🪛️ A live Stripe key is configured. Real cards will be charged.");
        }
        let base_url = env::var("PAYGATE_STRIPE_BASE_URL").ok().unwrap_or_else(|| {
            debug!("🪛️ PAYGATE_STRIPE_BASE_URL is not set, using {STRIPE_URL}");
            STRIPE_URL.to_string()
        });
        let default_currency = env::var("PAYGATE_STRIPE_CURRENCY").ok().unwrap_or_else(|| {
            info!("🪛️ PAYGATE_STRIPE_CURRENCY is not set, using {DEFAULT_STRIPE_CURRENCY}");
            DEFAULT_STRIPE_CURRENCY.to_string()
        });
        Self { secret_key: Secret::new(secret_key), default_currency, base_url }
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        validate_credentials("stripe", &self.secret_key, &self.default_currency, &self.base_url)
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}
