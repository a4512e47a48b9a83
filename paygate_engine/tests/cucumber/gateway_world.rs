use std::{collections::HashMap, sync::Arc};

use cucumber::World;
use paygate_engine::{
    test_utils::{PinSimulator, ScriptedTransport},
    Gateway,
    GatewayError,
    HttpRequest,
    HttpResponse,
    Transaction,
    Transport,
    TransportError,
};

/// The transport behind the gateway under test: canned responses, or the stateful Pin simulator.
#[derive(Debug, Clone)]
pub enum WorldTransport {
    Scripted(Arc<ScriptedTransport>),
    Simulated(Arc<PinSimulator>),
}

impl Transport for WorldTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        match self {
            Self::Scripted(t) => t.send(request).await,
            Self::Simulated(t) => t.send(request).await,
        }
    }
}

#[derive(Default, Debug, World)]
pub struct GatewayWorld {
    pub transport: Option<WorldTransport>,
    pub gateway: Option<Gateway<WorldTransport>>,
    pub last_result: Option<Result<Transaction, GatewayError>>,
    /// Tokens remembered by name, so scenarios can refer to simulator-generated tokens.
    pub tokens: HashMap<String, String>,
}

impl GatewayWorld {
    pub fn gateway(&self) -> &Gateway<WorldTransport> {
        self.gateway.as_ref().expect("No gateway has been configured")
    }

    pub fn scripted(&self) -> Option<&ScriptedTransport> {
        match &self.transport {
            Some(WorldTransport::Scripted(t)) => Some(t.as_ref()),
            _ => None,
        }
    }

    /// Resolves a remembered token name, or returns the argument itself if it is a literal token.
    pub fn token(&self, name: &str) -> String {
        self.tokens.get(name).cloned().unwrap_or_else(|| name.to_string())
    }

    pub fn transaction(&self) -> &Transaction {
        match self.last_result.as_ref().expect("No operation has been performed") {
            Ok(tx) => tx,
            Err(e) => panic!("Expected the operation to succeed, but it failed: {e:?}"),
        }
    }

    pub fn failure(&self) -> &GatewayError {
        match self.last_result.as_ref().expect("No operation has been performed") {
            Ok(tx) => panic!("Expected the operation to fail, but it succeeded: {tx:?}"),
            Err(e) => e,
        }
    }
}
