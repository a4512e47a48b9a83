use std::sync::Arc;

use paygate_common::Secret;
pub use reqwest::Method;
use thiserror::Error;

use crate::params::ParamSet;

pub mod reqwest_transport;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("The request timed out. {0}")]
    Timeout(String),
    #[error("Could not connect to the gateway. {0}")]
    Connect(String),
    #[error("The request could not be completed. {0}")]
    Request(String),
    /// The request could not be encoded as HTTP, so nothing was sent. Retrying the same input fails the same way.
    #[error("The request could not be built. {0}")]
    InvalidRequest(String),
}

/// One outgoing HTTP request, fully resolved by an adapter.
///
/// The authorization header value is kept apart from the other headers as a [`Secret`], and the body stays a
/// [`ParamSet`] until the transport encodes it, so logging a request never reveals credentials or card data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub authorization: Option<Secret<String>>,
    /// Sent form-encoded when present.
    pub body: Option<ParamSet>,
}

impl HttpRequest {
    pub fn new<S: Into<String>>(method: Method, url: S) -> Self {
        Self { method, url: url.into(), headers: vec![], authorization: None, body: None }
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_authorization(mut self, value: Secret<String>) -> Self {
        self.authorization = Some(value);
        self
    }

    pub fn with_body(mut self, body: ParamSet) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

/// The raw answer from the gateway. The body is kept as bytes: it may be empty, truncated or not UTF-8 at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new<B: Into<Vec<u8>>>(status: u16, body: B) -> Self {
        Self { status, headers: vec![], body: body.into() }
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The HTTP collaborator. Sends one request and returns the status, headers and body, or a [`TransportError`] if no
/// response was received at all (DNS failure, refused connection, timeout).
///
/// A non-2xx status is NOT a transport error: it is a normal response for the adapter to normalize.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.as_ref().send(request).await
    }
}

impl<T: Transport> Transport for &T {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (*self).send(request).await
    }
}
