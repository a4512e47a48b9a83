use paygate_common::{helpers::is_currency_code, Secret};
use url::Url;

use crate::errors::GatewayError;

/// `Authorization` header value for HTTP Basic auth.
pub fn basic_auth(username: &Secret<String>, password: &str) -> Secret<String> {
    let credentials = format!("{}:{password}", username.reveal());
    Secret::new(format!("Basic {}", base64::encode(credentials)))
}

/// `Authorization` header value for bearer-token auth.
pub fn bearer_auth(token: &Secret<String>) -> Secret<String> {
    Secret::new(format!("Bearer {}", token.reveal()))
}

/// Checks the resolved credentials for a gateway before any request is made.
pub fn validate_credentials(
    gateway: &str,
    api_key: &Secret<String>,
    default_currency: &str,
    base_url: &str,
) -> Result<(), GatewayError> {
    if api_key.is_empty() {
        return Err(GatewayError::ConfigError(format!("No API key was provided for the {gateway} gateway")));
    }
    if !is_currency_code(default_currency) {
        return Err(GatewayError::ConfigError(format!(
            "'{default_currency}' is not a valid default currency for the {gateway} gateway"
        )));
    }
    let url = Url::parse(base_url)
        .map_err(|e| GatewayError::ConfigError(format!("Invalid base URL for the {gateway} gateway. {e}")))?;
    if !["http", "https"].contains(&url.scheme()) {
        return Err(GatewayError::ConfigError(format!(
            "The {gateway} base URL must use http or https, not {}",
            url.scheme()
        )));
    }
    Ok(())
}

/// Joins a base URL and a path without doubling up slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
