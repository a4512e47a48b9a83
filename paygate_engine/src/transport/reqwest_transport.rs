use std::{env, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    redirect,
    Client,
};

use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("paygate/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Applies to the whole request, from connecting to reading the last byte of the body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

impl TransportConfig {
    pub fn from_env_or_default() -> Self {
        let timeout = env::var("PAYGATE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        warn!("🪛️ {s} is not a valid value for PAYGATE_HTTP_TIMEOUT_SECS. {e} Using the default.");
                    })
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { timeout, ..Default::default() }
    }
}

/// The default [`Transport`], backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            // A 3xx goes back to the adapter as is. The form body must never reach another host.
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Request(format!("Could not initialize HTTP client. {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        trace!("Sending {} {}", request.method, request.url);
        let mut req = self.client.request(request.method, request.url.as_str());
        for (name, value) in &request.headers {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidRequest(format!("'{name}' is not a valid header name")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidRequest(format!("The {name} header contains invalid characters")))?;
            req = req.header(header, value);
        }
        if let Some(auth) = &request.authorization {
            let mut value = HeaderValue::from_str(auth.reveal()).map_err(|_| {
                TransportError::InvalidRequest("The Authorization header contains invalid characters".into())
            })?;
            value.set_sensitive(true);
            req = req.header(AUTHORIZATION, value);
        }
        if let Some(body) = &request.body {
            req = req.header(CONTENT_TYPE, "application/x-www-form-urlencoded").body(body.to_form_body());
        }
        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect::<Vec<(String, String)>>();
        let body = response.bytes().await?.to_vec();
        trace!("Received HTTP {status} ({} bytes)", body.len());
        Ok(HttpResponse { status, headers, body })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        // Strip the URL so that path segments (tokens) don't end up in error messages.
        let e = e.without_url();
        if e.is_builder() {
            Self::InvalidRequest(e.to_string())
        } else if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}
