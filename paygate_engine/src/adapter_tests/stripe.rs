use paygate_common::Amount;
use reqwest::Method;

use super::{local_http::watch_for_connections, mocks::MockHttpTransport};
use crate::{
    errors::ErrorKind,
    gateways::stripe::{StripeConfig, StripeGateway},
    test_utils::{test_card, ScriptedTransport},
    traits::GatewayAdapter,
    transport::{
        reqwest_transport::{ReqwestTransport, TransportConfig},
        HttpResponse,
    },
    types::{CaptureOptions, ChargeOptions, PaymentSource, RefundOptions, StoreOptions, TransactionStatus, VoidOptions},
};

const KEY: &str = "sk_test_4eC39HqLyjWDarjtT1zdp7dc";

fn gateway<T: crate::transport::Transport>(transport: T) -> StripeGateway<T> {
    StripeGateway::new(StripeConfig::new(KEY), transport).expect("valid config")
}

const CHARGE: &str = r#"{"id":"ch_3MmlLrLkdIwHu7ix0snN0B15","object":"charge","amount":10000,"captured":false,
    "created":1679090539,"currency":"usd","status":"succeeded"}"#;

#[tokio::test]
async fn purchase_uses_bearer_auth_and_idempotency_key() {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .withf(|req| {
            let body = req.body.as_ref().expect("form body");
            req.method == Method::POST &&
                req.url == "https://api.stripe.com/v1/charges" &&
                req.authorization.as_ref().map(|a| a.reveal().as_str()) == Some(&format!("Bearer {KEY}")[..]) &&
                req.header("idempotency-key") == Some("order-1001") &&
                body.get("currency") == Some("usd") &&
                body.get("capture") == Some("true") &&
                body.get("receipt_email") == Some("a@b.com") &&
                body.get("card[exp_month]") == Some("5") &&
                !body.contains_key("card[expiry_month]")
        })
        .times(1)
        .returning(|_| Ok(HttpResponse::new(200, CHARGE.replace(r#""captured":false"#, r#""captured":true"#))));
    let stripe = gateway(transport);
    let options = ChargeOptions::default().with_email("a@b.com").with_order_id("order-1001");
    let tx = stripe.purchase(Amount::from(100_00), &PaymentSource::from(test_card()), &options).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Captured);
    assert_eq!(tx.gateway, "stripe");
    assert_eq!(tx.currency.as_deref(), Some("USD"));
}

#[tokio::test]
async fn lifecycle_against_scripted_responses() {
    let transport = ScriptedTransport::new();
    transport.push_response(200, CHARGE);
    transport.push_response(200, CHARGE.replace(r#""captured":false"#, r#""captured":true"#));
    transport.push_response(200, r#"{"id":"re_1","object":"refund","amount":1000,"status":"succeeded"}"#);
    transport.push_response(
        400,
        r#"{"error":{"type":"invalid_request_error","code":"charge_already_captured","message":"Charge ch_3MmlLrLkdIwHu7ix0snN0B15 has already been captured."}}"#,
    );
    let stripe = gateway(&transport);

    let tx = stripe.authorize(Amount::from(100_00), &PaymentSource::from("tok_visa"), &ChargeOptions::default()).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Authorized);
    let token = tx.token;
    let tx = stripe.capture(&token, Amount::from(100_00), &CaptureOptions::default()).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Captured);
    let tx = stripe.refund(Amount::from(10_00), &token, &RefundOptions::default()).await.unwrap();
    assert_eq!(tx.token, "re_1");
    let err = stripe.capture(&token, Amount::from(100_00), &CaptureOptions::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);
    assert!(err.kind().is_client_error());
    assert_eq!(err.reason(), "charge_already_captured");

    let requests = transport.requests();
    assert_eq!(requests[0].body.as_ref().and_then(|b| b.get("source")), Some("tok_visa"));
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].url, format!("https://api.stripe.com/v1/charges/{token}/capture"));
    assert_eq!(requests[2].url, "https://api.stripe.com/v1/refunds");
    assert_eq!(requests[2].body.as_ref().and_then(|b| b.get("charge")), Some(token.as_str()));
    assert!(requests.iter().all(|r| r.header("Idempotency-Key").is_none()));
}

#[tokio::test]
async fn customers_and_voids() {
    let transport = ScriptedTransport::new();
    transport.push_response(200, r#"{"id":"cus_NffrFeUfNV2Hib","object":"customer"}"#);
    transport.push_response(200, r#"{"id":"re_2","object":"refund","status":"succeeded"}"#);
    transport.push_response(200, r#"{"id":"cus_NffrFeUfNV2Hib","object":"customer","deleted":true}"#);
    let stripe = gateway(&transport);

    let tx = stripe.store(&test_card(), &StoreOptions::default().with_email("jenny@example.com")).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Stored);
    let tx = stripe.void("ch_1", &VoidOptions::default().with_order_id("void-1")).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Voided);
    let tx = stripe.unstore("cus_NffrFeUfNV2Hib").await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Unstored);

    let requests = transport.requests();
    assert_eq!(requests[1].header("Idempotency-Key"), Some("void-1"));
    assert_eq!(requests[2].method, Method::DELETE);
    assert_eq!(requests[2].url, "https://api.stripe.com/v1/customers/cus_NffrFeUfNV2Hib");
}

#[tokio::test]
async fn errors_mentioning_the_key_are_scrubbed() {
    let transport = ScriptedTransport::new();
    transport.push_response(
        401,
        format!(r#"{{"error":{{"type":"invalid_request_error","message":"Invalid API Key provided: {KEY}"}}}}"#),
    );
    let stripe = gateway(&transport);
    let err = stripe.store(&test_card(), &StoreOptions::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert_eq!(err.detail(), Some("Invalid API Key provided: ****"));
    assert!(!format!("{err:?}").contains(KEY));
}

#[tokio::test]
async fn rate_limits_are_transient() {
    let transport = ScriptedTransport::new();
    transport.push_response(429, r#"{"error":{"type":"rate_limit_error","message":"Too many requests"}}"#);
    let stripe = gateway(&transport);
    let err = stripe.refund(Amount::from(100), "ch_1", &RefundOptions::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransientError);
    assert_eq!(err.status(), Some(429));
    // No automatic retries.
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn an_unsendable_idempotency_key_is_not_retryable() {
    let (port, contacted) = watch_for_connections().await;
    let config = StripeConfig::new(KEY).with_base_url(&format!("http://127.0.0.1:{port}/v1"));
    let stripe = StripeGateway::new(config, ReqwestTransport::new(&TransportConfig::default()).unwrap()).unwrap();
    let options = ChargeOptions::default().with_order_id("order\n1");
    let err = stripe
        .purchase(Amount::from(100_00), &PaymentSource::from("tok_visa"), &options)
        .await
        .expect_err("The header cannot be encoded");
    assert_eq!(err.kind(), ErrorKind::ConfigError);
    assert!(!err.is_retryable());
    assert!(err.reason().contains("Idempotency-Key"));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(!contacted.load(std::sync::atomic::Ordering::SeqCst));
}
