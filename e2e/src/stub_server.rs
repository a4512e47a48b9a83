use std::{
    io,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
        Mutex,
    },
    time::Duration,
};

use actix_web::{
    dev::ServerHandle,
    http::StatusCode,
    web,
    App,
    HttpRequest,
    HttpResponse,
    HttpServer,
};
use log::*;
use paygate_engine::{test_utils::PinSimulator, Method, ParamSet};

/// The API root the stub serves under, matching Pin's `/1` version prefix.
pub const API_ROOT: &str = "/1";

/// Shared state of a running stub server. Tests use it to inject faults between requests.
#[derive(Debug)]
pub struct StubState {
    simulator: PinSimulator,
    /// Replies served verbatim, in order, before falling back to the simulator.
    overrides: Mutex<Vec<(u16, String)>>,
    delay_ms: AtomicU64,
}

impl StubState {
    pub fn new(api_key: &str) -> Self {
        Self { simulator: PinSimulator::new(api_key), overrides: Mutex::new(vec![]), delay_ms: AtomicU64::new(0) }
    }

    pub fn simulator(&self) -> &PinSimulator {
        &self.simulator
    }

    /// The next request is answered with `status` and `body` instead of the simulator's reply.
    pub fn reply_once(&self, status: u16, body: &str) {
        self.overrides.lock().unwrap_or_else(|e| e.into_inner()).push((status, body.to_string()));
    }

    /// Every following request waits this long before being answered.
    pub fn stall_for(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    fn take_override(&self) -> Option<(u16, String)> {
        let mut overrides = self.overrides.lock().unwrap_or_else(|e| e.into_inner());
        if overrides.is_empty() {
            None
        } else {
            Some(overrides.remove(0))
        }
    }
}

async fn handle(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let delay = state.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        actix_web::rt::time::sleep(Duration::from_millis(delay)).await;
    }
    let (status, body) = match state.take_override() {
        Some(reply) => reply,
        None => {
            let path = req.path().strip_prefix(API_ROOT).unwrap_or(req.path());
            let method = Method::from_bytes(req.method().as_str().as_bytes()).unwrap_or(Method::GET);
            let authorization = req.headers().get("authorization").and_then(|v| v.to_str().ok());
            let params = match serde_urlencoded::from_bytes::<Vec<(String, String)>>(&body) {
                Ok(pairs) => pairs.into_iter().collect::<ParamSet>(),
                Err(e) => {
                    warn!("🧪️ Stub server could not decode the form body. {e}");
                    ParamSet::new()
                },
            };
            state.simulator.handle(&method, path, authorization, &params)
        },
    };
    trace!("🧪️ Stub server: {} {} -> {status}", req.method(), req.path());
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if body.is_empty() {
        HttpResponse::build(status).finish()
    } else {
        HttpResponse::build(status).content_type("application/json").body(body)
    }
}

/// Starts the stub on `127.0.0.1:port`. Must be called from within a tokio runtime.
pub fn start_stub_server(port: u16, state: Arc<StubState>) -> io::Result<ServerHandle> {
    let data = web::Data::from(state);
    let server = HttpServer::new(move || App::new().app_data(data.clone()).default_service(web::to(handle)))
        .workers(1)
        .bind(("127.0.0.1", port))?
        .run();
    let handle = server.handle();
    tokio::spawn(async move {
        match server.await {
            Ok(_) => info!("🧪️ Stub server shut down"),
            Err(e) => warn!("🧪️ Stub server error: {e}"),
        }
    });
    info!("🧪️ Stub Pin server listening on port {port}");
    Ok(handle)
}

pub fn random_port() -> u16 {
    20000 + rand::random::<u16>() % 10_000
}
