//! Request builders for Stripe.
//!
//! Stripe takes form-encoded bodies with nested keys (`card[exp_month]`, `metadata[order_id]`), amounts in the
//! currency's smallest unit and lower-case currency codes. Zero-decimal currencies such as JPY are handled by Stripe
//! itself, so the minor-unit amount is sent unchanged.
//!
//! The caller's `order_id` becomes the `Idempotency-Key` header and is also recorded as `metadata[order_id]`.
//! Stripe ignores `ChargeOptions::ip_address`. Voids are refunds of an uncaptured charge, which Stripe treats as
//! releasing the authorization.
use paygate_common::Amount;
use reqwest::Method;

use crate::{
    params::{nested, ApiCall, ParamSet},
    types::{Card, ChargeOptions, PaymentSource, RefundOptions, StoreOptions, VoidOptions},
};

pub fn build_auth_or_purchase(
    amount: Amount,
    source: &PaymentSource,
    options: &ChargeOptions,
    capture: bool,
    default_currency: &str,
) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert("amount", amount.value().to_string());
    params.insert("currency", options.currency_or(default_currency).to_ascii_lowercase());
    params.insert("capture", capture.to_string());
    params.insert_opt("description", options.description.as_deref());
    params.insert_opt("receipt_email", options.email.as_deref());
    params.insert_opt(nested("metadata", "order_id"), options.order_id.as_deref());
    for (key, value) in &options.metadata {
        params.insert(nested("metadata", key), value.as_str());
    }
    match source {
        PaymentSource::Card(card) => add_card(&mut params, card),
        PaymentSource::Token(token) if token.starts_with("cus_") => params.insert("customer", token.as_str()),
        PaymentSource::Token(token) => params.insert("source", token.as_str()),
    }
    ApiCall::new(Method::POST, "/charges", params).with_idempotency_key(options.order_id.as_deref())
}

pub fn build_capture(token: &str, amount: Amount, order_id: Option<&str>) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert("amount", amount.value().to_string());
    ApiCall::new(Method::POST, format!("/charges/{}/capture", urlencoding::encode(token)), params)
        .with_idempotency_key(order_id)
}

pub fn build_refund(token: &str, amount: Amount, options: &RefundOptions) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert("charge", token);
    params.insert("amount", amount.value().to_string());
    params.insert_opt(nested("metadata", "reason"), options.reason.as_deref());
    params.insert_opt(nested("metadata", "order_id"), options.order_id.as_deref());
    ApiCall::new(Method::POST, "/refunds", params).with_idempotency_key(options.order_id.as_deref())
}

pub fn build_void(token: &str, options: &VoidOptions) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert("charge", token);
    params.insert_opt(nested("metadata", "order_id"), options.order_id.as_deref());
    ApiCall::new(Method::POST, "/refunds", params).with_idempotency_key(options.order_id.as_deref())
}

pub fn build_store(card: &Card, options: &StoreOptions) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert_opt("email", options.email.as_deref());
    params.insert_opt("description", options.description.as_deref());
    params.insert_opt(nested("metadata", "order_id"), options.order_id.as_deref());
    add_card(&mut params, card);
    ApiCall::new(Method::POST, "/customers", params).with_idempotency_key(options.order_id.as_deref())
}

pub fn build_unstore(token: &str) -> ApiCall {
    ApiCall::new(Method::DELETE, format!("/customers/{}", urlencoding::encode(token)), ParamSet::new())
}

fn add_card(params: &mut ParamSet, card: &Card) {
    params.insert_masked(nested("card", "number"), &card.number);
    params.insert(nested("card", "exp_month"), card.expiry_month.to_string());
    params.insert(nested("card", "exp_year"), card.expiry_year.to_string());
    params.insert_masked(nested("card", "cvc"), &card.cvc);
    params.insert(nested("card", "name"), card.holder_name.as_str());
    if let Some(address) = &card.address {
        params.insert_opt(nested("card", "address_line1"), address.line1.as_deref());
        params.insert_opt(nested("card", "address_line2"), address.line2.as_deref());
        params.insert_opt(nested("card", "address_city"), address.city.as_deref());
        params.insert_opt(nested("card", "address_zip"), address.postcode.as_deref());
        params.insert_opt(nested("card", "address_state"), address.state.as_deref());
        params.insert_opt(nested("card", "address_country"), address.country.as_deref());
    }
}
