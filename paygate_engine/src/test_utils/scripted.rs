use std::{collections::VecDeque, sync::Mutex};

use log::*;

use super::lock;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// A [`Transport`] that answers with pre-loaded responses, first in first out.
///
/// Running out of responses is reported as a [`TransportError::Connect`], which adapters see as a transient failure.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response<B: Into<Vec<u8>>>(&self, status: u16, body: B) {
        lock(&self.responses).push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_error(&self, error: TransportError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        trace!("📜️ Scripted transport received {} {}", request.method, request.url);
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connect("No scripted response left".to_string())))
    }
}
