use std::{sync::Arc, time::Duration};

use cucumber::given;
use e2e::stub_server::{random_port, start_stub_server, StubState};
use log::*;
use paygate_engine::{PinConfig, PinGateway, ReqwestTransport, TransportConfig};

use crate::cucumber::{world::API_KEY, E2eWorld};

fn pin_gateway(base_url: &str, api_key: &str, timeout: Duration) -> PinGateway<ReqwestTransport> {
    let transport = ReqwestTransport::new(&TransportConfig { timeout, ..Default::default() })
        .expect("Could not create the HTTP transport");
    let config = PinConfig::new(api_key).with_base_url(base_url);
    PinGateway::new(config, transport).expect("Invalid Pin configuration")
}

#[given("a running stub Pin server")]
async fn start_server(world: &mut E2eWorld) {
    let state = Arc::new(StubState::new(API_KEY));
    // Ports are random, so retry a few times in case of a clash with another test run.
    for _ in 0..5 {
        let port = random_port();
        match start_stub_server(port, Arc::clone(&state)) {
            Ok(handle) => {
                world.port = port;
                world.server_handle = Some(handle);
                world.stub = Some(state);
                // Give the server a moment to accept connections
                tokio::time::sleep(Duration::from_millis(50)).await;
                return;
            },
            Err(e) => warn!("🚀️ Could not bind the stub server to port {port}. {e}"),
        }
    }
    panic!("Could not start the stub server");
}

#[given("a pin gateway talking to the stub server")]
async fn gateway_for_stub(world: &mut E2eWorld) {
    world.gateway = Some(pin_gateway(&world.base_url(), API_KEY, Duration::from_secs(5)));
}

#[given(expr = "a pin gateway talking to the stub server with a {int}ms timeout")]
async fn gateway_with_timeout(world: &mut E2eWorld, millis: u64) {
    world.gateway = Some(pin_gateway(&world.base_url(), API_KEY, Duration::from_millis(millis)));
}

#[given(expr = "a pin gateway talking to the stub server with the key {string}")]
async fn gateway_with_key(world: &mut E2eWorld, key: String) {
    world.gateway = Some(pin_gateway(&world.base_url(), &key, Duration::from_secs(5)));
}

#[given("a pin gateway pointing at a closed port")]
async fn gateway_for_closed_port(world: &mut E2eWorld) {
    // Nothing listens on the discard port on a test machine.
    world.gateway = Some(pin_gateway("http://127.0.0.1:9/1", API_KEY, Duration::from_secs(2)));
}

#[given(expr = "the stub server stalls for {int}ms")]
async fn stall(world: &mut E2eWorld, millis: u64) {
    world.stub().stall_for(Duration::from_millis(millis));
}

#[given(expr = "the stub server replies once with {int} and {string}")]
async fn reply_once(world: &mut E2eWorld, status: u16, body: String) {
    world.stub().reply_once(status, &body);
}
