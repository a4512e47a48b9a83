use cucumber::{then, when};
use paygate_common::Amount;
use paygate_engine::{
    test_utils::test_card,
    CaptureOptions,
    ChargeOptions,
    GatewayAdapter,
    PaymentSource,
    RefundOptions,
    StoreOptions,
    VoidOptions,
};

use crate::cucumber::GatewayWorld;

fn charge_options() -> ChargeOptions {
    ChargeOptions::default().with_email("a@b.com")
}

#[when(expr = "I authorize {int} cents on the test card")]
async fn authorize(world: &mut GatewayWorld, amount: i64) {
    let source = PaymentSource::from(test_card());
    let result = world.gateway().authorize(Amount::from(amount), &source, &charge_options()).await;
    world.last_result = Some(result);
}

#[when(expr = "I purchase {int} cents on the test card")]
async fn purchase(world: &mut GatewayWorld, amount: i64) {
    let source = PaymentSource::from(test_card());
    let result = world.gateway().purchase(Amount::from(amount), &source, &charge_options()).await;
    world.last_result = Some(result);
}

#[when(expr = "I purchase {int} cents with token {word}")]
async fn purchase_with_token(world: &mut GatewayWorld, amount: i64, token: String) {
    let source = PaymentSource::Token(world.token(&token));
    let result = world.gateway().purchase(Amount::from(amount), &source, &ChargeOptions::default()).await;
    world.last_result = Some(result);
}

#[when(expr = "I capture {int} cents on {word}")]
async fn capture(world: &mut GatewayWorld, amount: i64, token: String) {
    let token = world.token(&token);
    let result = world.gateway().capture(&token, Amount::from(amount), &CaptureOptions::default()).await;
    world.last_result = Some(result);
}

#[when(expr = "I refund {int} cents on {word}")]
async fn refund(world: &mut GatewayWorld, amount: i64, token: String) {
    let token = world.token(&token);
    let result = world.gateway().refund(Amount::from(amount), &token, &RefundOptions::default()).await;
    world.last_result = Some(result);
}

#[when(expr = "I void {word}")]
async fn void(world: &mut GatewayWorld, token: String) {
    let token = world.token(&token);
    let result = world.gateway().void(&token, &VoidOptions::default()).await;
    world.last_result = Some(result);
}

#[when("I store the test card")]
async fn store(world: &mut GatewayWorld) {
    let options = StoreOptions::default().with_email("roland@pinpayments.com");
    let result = world.gateway().store(&test_card(), &options).await;
    world.last_result = Some(result);
}

#[when(expr = "I unstore {word}")]
async fn unstore(world: &mut GatewayWorld, token: String) {
    let token = world.token(&token);
    let result = world.gateway().unstore(&token).await;
    world.last_result = Some(result);
}

#[then("the operation succeeds")]
async fn succeeds(world: &mut GatewayWorld) {
    let _ = world.transaction();
}

#[then(expr = "the operation succeeds with token {string}")]
async fn succeeds_with_token(world: &mut GatewayWorld, token: String) {
    assert_eq!(world.transaction().token, token);
}

#[then("the transaction is captured")]
async fn is_captured(world: &mut GatewayWorld) {
    assert_eq!(world.transaction().captured, Some(true));
}

#[then("the transaction is not captured")]
async fn is_not_captured(world: &mut GatewayWorld) {
    assert_eq!(world.transaction().captured, Some(false));
}

#[then(expr = "the transaction status is {word}")]
async fn transaction_status(world: &mut GatewayWorld, status: String) {
    let actual = format!("{:?}", world.transaction().status);
    assert_eq!(actual.to_lowercase(), status.to_lowercase());
}

#[then(expr = "the operation fails with {word}")]
async fn fails_with(world: &mut GatewayWorld, kind: String) {
    assert_eq!(format!("{:?}", world.failure().kind()), kind);
}

#[then(expr = "the failure reason is {string}")]
async fn failure_reason(world: &mut GatewayWorld, reason: String) {
    assert_eq!(world.failure().reason(), reason);
}

#[then(expr = "I remember the token as {word}")]
async fn remember_token(world: &mut GatewayWorld, name: String) {
    let token = world.transaction().token.clone();
    world.tokens.insert(name, token);
}

#[then(expr = "the tokens {word} and {word} are different")]
async fn tokens_differ(world: &mut GatewayWorld, a: String, b: String) {
    assert_ne!(world.token(&a), world.token(&b));
}

#[then(expr = "the last request was a {word} to {string}")]
async fn last_request(world: &mut GatewayWorld, method: String, path: String) {
    let request = world.scripted().and_then(|t| t.last_request()).expect("No request was recorded");
    assert_eq!(request.method.as_str(), method);
    assert!(request.url.ends_with(&path), "{} does not end with {path}", request.url);
}
