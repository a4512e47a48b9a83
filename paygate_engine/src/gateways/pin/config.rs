use std::env;

use log::*;
use paygate_common::Secret;

use crate::{
    errors::GatewayError,
    helpers::{join_url, validate_credentials},
};

pub const PIN_LIVE_URL: &str = "https://api.pinpayments.com/1";
pub const PIN_TEST_URL: &str = "https://test-api.pinpayments.com/1";
const DEFAULT_PIN_CURRENCY: &str = "AUD";

/// Resolved credentials and endpoint for Pin Payments.
#[derive(Debug, Clone)]
pub struct PinConfig {
    /// The secret API key. Sent as the Basic auth username.
    pub api_key: Secret<String>,
    /// Used when a charge does not override the currency.
    pub default_currency: String,
    pub base_url: String,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            api_key: Secret::default(),
            default_currency: DEFAULT_PIN_CURRENCY.to_string(),
            base_url: PIN_TEST_URL.to_string(),
        }
    }
}

impl PinConfig {
    /// A configuration for the Pin test environment.
    pub fn new(api_key: &str) -> Self {
        Self { api_key: Secret::from(api_key), ..Default::default() }
    }

    pub fn live(api_key: &str) -> Self {
        Self::new(api_key).with_base_url(PIN_LIVE_URL)
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
        let api_key = env::var("PAYGATE_PIN_API_KEY").ok().unwrap_or_else(|| {
            error!("🪛️ PAYGATE_PIN_API_KEY is not set. Please set it to your Pin Payments secret API key.");
            String::default()
        });
        let base_url = env::var("PAYGATE_PIN_BASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ PAYGATE_PIN_BASE_URL is not set, using the Pin test environment ({PIN_TEST_URL})");
            PIN_TEST_URL.to_string()
        });
        let default_currency = env::var("PAYGATE_PIN_CURRENCY").ok().unwrap_or_else(|| {
            info!("🪛️ PAYGATE_PIN_CURRENCY is not set, using {DEFAULT_PIN_CURRENCY}");
            DEFAULT_PIN_CURRENCY.to_string()
        });
        Self { api_key: Secret::new(api_key), default_currency, base_url }
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        validate_credentials("pin", &self.api_key, &self.default_currency, &self.base_url)
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}
