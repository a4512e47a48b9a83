use paygate_common::Amount;
use reqwest::Method;

use super::{
    local_http::{redirect_to, reply_once, watch_for_connections},
    mocks::MockHttpTransport,
};
use crate::{
    errors::ErrorKind,
    gateways::pin::{PinConfig, PinGateway},
    test_utils::{test_card, ScriptedTransport},
    traits::GatewayAdapter,
    transport::{
        reqwest_transport::{ReqwestTransport, TransportConfig},
        HttpResponse,
        TransportError,
    },
    types::{CaptureOptions, ChargeOptions, PaymentSource, RefundOptions, StoreOptions, TransactionStatus, VoidOptions},
};

const KEY: &str = "pk_secret_key_123";
const BASE_URL: &str = "https://test-api.pinpayments.com/1";

fn gateway<T: crate::transport::Transport>(transport: T) -> PinGateway<T> {
    PinGateway::new(PinConfig::new(KEY), transport).expect("valid config")
}

#[tokio::test]
async fn authorize_sends_a_form_post_with_basic_auth() {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .withf(|req| {
            let body = req.body.as_ref().expect("form body");
            req.method == Method::POST &&
                req.url == format!("{BASE_URL}/charges") &&
                req.authorization.as_ref().map(|a| a.reveal().as_str()) == Some("Basic cGtfc2VjcmV0X2tleV8xMjM6") &&
                body.get("amount") == Some("10000") &&
                body.get("capture") == Some("false") &&
                body.get("email") == Some("a@b.com") &&
                body.get("card[number]") == Some("5520000000000000") &&
                req.header("Idempotency-Key").is_none()
        })
        .times(1)
        .returning(|_| Ok(HttpResponse::new(201, r#"{"response":{"token":"charge_abc","captured":false}}"#)));
    let pin = gateway(transport);
    let options = ChargeOptions::default().with_email("a@b.com");
    let tx = pin.authorize(Amount::from(100_00), &PaymentSource::from(test_card()), &options).await.unwrap();
    assert_eq!(tx.token, "charge_abc");
    assert_eq!(tx.captured, Some(false));
    assert_eq!(tx.status, TransactionStatus::Authorized);
}

#[tokio::test]
async fn authorize_capture_refund_then_decline() {
    let transport = ScriptedTransport::new();
    transport.push_response(201, r#"{"response":{"token":"charge_abc","captured":false}}"#);
    transport.push_response(200, r#"{"response":{"token":"charge_abc","captured":true}}"#);
    transport.push_response(200, r#"{"response":{"token":"refund_def"}}"#);
    transport.push_response(402, r#"{"error":"card_declined"}"#);
    let pin = gateway(&transport);
    let card = PaymentSource::from(test_card());
    let options = ChargeOptions::default().with_email("a@b.com");

    let tx = pin.authorize(Amount::from(100_00), &card, &options).await.unwrap();
    assert_eq!((tx.token.as_str(), tx.captured), ("charge_abc", Some(false)));
    let tx = pin.capture("charge_abc", Amount::from(100_00), &CaptureOptions::default()).await.unwrap();
    assert!(tx.is_captured());
    assert_eq!(tx.status, TransactionStatus::Captured);
    let tx = pin.refund(Amount::from(10_00), "charge_abc", &RefundOptions::default()).await.unwrap();
    assert_eq!(tx.token, "refund_def");
    assert_eq!(tx.status, TransactionStatus::Refunded);
    let err = pin.authorize(Amount::from(100_00), &card, &options).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert_eq!(err.reason(), "card_declined");

    let requests = transport.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(requests[1].url, format!("{BASE_URL}/charges/charge_abc/capture"));
    assert_eq!(requests[2].url, format!("{BASE_URL}/charges/charge_abc/refunds"));
    assert_eq!(requests[2].body.as_ref().and_then(|b| b.get("amount")), Some("1000"));
}

#[tokio::test]
async fn transport_failures_are_transient() {
    let mut transport = MockHttpTransport::new();
    transport.expect_send().times(1).returning(|_| Err(TransportError::Timeout("operation timed out".into())));
    let pin = gateway(transport);
    let err = pin.purchase(Amount::from(500), &PaymentSource::from("cus_1"), &ChargeOptions::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransientError);
    assert_eq!(err.status(), None);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn the_api_key_never_leaks_into_errors() {
    let transport = ScriptedTransport::new();
    transport.push_response(401, format!(r#"{{"error":"unauthenticated","error_description":"Bad key {KEY}"}}"#));
    transport.push_response(500, format!("upstream said {KEY}"));
    let pin = gateway(&transport);
    for _ in 0..2 {
        let err = pin.void("ch_1", &VoidOptions::default()).await.unwrap_err();
        assert!(!err.to_string().contains(KEY));
        assert!(!err.reason().contains(KEY));
        assert!(!err.detail().unwrap_or_default().contains(KEY));
        assert!(!format!("{err:?}").contains(KEY));
    }
    assert!(!format!("{pin:?}").contains(KEY));
}

#[tokio::test]
async fn store_void_and_unstore() {
    let transport = ScriptedTransport::new();
    transport.push_response(201, r#"{"response":{"token":"cus_XZg1ULpWaROQCOT5PdwLkQ","email":"roland@pinpayments.com"}}"#);
    transport.push_response(200, r#"{"response":{"token":"ch_1","captured":false}}"#);
    transport.push_response(204, "");
    let pin = gateway(&transport);

    let options = StoreOptions::default().with_email("roland@pinpayments.com");
    let tx = pin.store(&test_card(), &options).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Stored);
    assert_eq!(tx.token, "cus_XZg1ULpWaROQCOT5PdwLkQ");
    let tx = pin.void("ch_1", &VoidOptions::default()).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Voided);
    let tx = pin.unstore("cus_XZg1ULpWaROQCOT5PdwLkQ").await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Unstored);

    let requests = transport.requests();
    assert_eq!(requests[0].url, format!("{BASE_URL}/customers"));
    assert_eq!(requests[1].url, format!("{BASE_URL}/charges/ch_1/void"));
    assert!(requests[1].body.is_none());
    assert_eq!(requests[2].method, Method::DELETE);
    assert!(requests.iter().all(|r| !format!("{r:?}").contains("5520000000000000")));
}

#[tokio::test]
async fn unexpected_statuses_are_protocol_errors() {
    let transport = ScriptedTransport::new();
    transport.push_response(302, "");
    transport.push_response(201, r#"{"response":{}}"#);
    let pin = gateway(&transport);
    let card = PaymentSource::from(test_card());
    for _ in 0..2 {
        let err = pin.purchase(Amount::from(100), &card, &ChargeOptions::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolError);
    }
}

#[test]
fn construction_fails_fast_on_bad_config() {
    let err = PinGateway::new(PinConfig::new(""), ScriptedTransport::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigError);
    let err = PinGateway::new(PinConfig::new(KEY).with_default_currency("A$"), ScriptedTransport::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigError);
}

#[tokio::test]
async fn a_redirected_charge_is_a_protocol_error() {
    let (elsewhere, contacted) = watch_for_connections().await;
    let port = reply_once(redirect_to(elsewhere, "/1/charges")).await;
    let config = PinConfig::new(KEY).with_base_url(&format!("http://127.0.0.1:{port}/1"));
    let pin = PinGateway::new(config, ReqwestTransport::new(&TransportConfig::default()).unwrap()).unwrap();
    let err = pin
        .purchase(Amount::from(400), &PaymentSource::from(test_card()), &ChargeOptions::default())
        .await
        .expect_err("A redirect is not a success");
    assert_eq!(err.kind(), ErrorKind::ProtocolError);
    assert_eq!(err.status(), Some(307));
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(!contacted.load(std::sync::atomic::Ordering::SeqCst), "Card data was re-sent to the redirect target");
}
