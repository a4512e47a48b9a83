use std::sync::Arc;

use cucumber::given;
use paygate_engine::{
    test_utils::{PinSimulator, ScriptedTransport},
    Gateway,
    GatewayConfig,
    GatewayKind,
    PinConfig,
    StripeConfig,
};

use crate::cucumber::{gateway_world::WorldTransport, GatewayWorld};

const PIN_KEY: &str = "pin_test_secret";
const STRIPE_KEY: &str = "sk_test_cucumber";

fn config_for(kind: GatewayKind) -> GatewayConfig {
    match kind {
        GatewayKind::Pin => GatewayConfig::Pin(PinConfig::new(PIN_KEY)),
        GatewayKind::Stripe => GatewayConfig::Stripe(StripeConfig::new(STRIPE_KEY)),
    }
}

fn install(world: &mut GatewayWorld, config: GatewayConfig, transport: WorldTransport) {
    let gateway = Gateway::new(config, transport.clone()).expect("Could not create the gateway");
    world.transport = Some(transport);
    world.gateway = Some(gateway);
}

#[given(expr = "a {word} gateway with scripted responses")]
async fn scripted_gateway(world: &mut GatewayWorld, kind: String) {
    let kind = kind.parse::<GatewayKind>().expect("Unknown gateway");
    let transport = WorldTransport::Scripted(Arc::new(ScriptedTransport::new()));
    install(world, config_for(kind), transport);
}

#[given("a pin gateway backed by the simulator")]
async fn simulated_gateway(world: &mut GatewayWorld) {
    let transport = WorldTransport::Simulated(Arc::new(PinSimulator::new(PIN_KEY)));
    install(world, config_for(GatewayKind::Pin), transport);
}

#[given(expr = "the gateway will reply {int} with {string}")]
async fn script_response(world: &mut GatewayWorld, status: u16, body: String) {
    let transport = world.scripted().expect("The gateway does not use scripted responses");
    transport.push_response(status, body);
}

#[given(expr = "the gateway will reply {int} with an empty body")]
async fn script_empty_response(world: &mut GatewayWorld, status: u16) {
    let transport = world.scripted().expect("The gateway does not use scripted responses");
    transport.push_response(status, "");
}
