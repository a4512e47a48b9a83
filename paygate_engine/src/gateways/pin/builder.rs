//! Request builders for Pin Payments.
//!
//! Wire conventions:
//! * form-encoded bodies, card fields nested as `card[...]` (`card[expiry_month]`, `card[address_postcode]`, ...);
//! * amounts as an integer number of cents, currencies as upper-case ISO codes;
//! * the caller's `order_id` travels as `metadata[order_id]` (Pin has no idempotency header);
//! * refunds, voids and customer operations take the token in the path.
//!
//! Pin ignores `RefundOptions::reason`, `RefundOptions::order_id`, `StoreOptions::description` and
//! `VoidOptions::order_id`; there is nowhere to put them.
use paygate_common::Amount;
use reqwest::Method;

use crate::{
    params::{nested, ApiCall, ParamSet},
    types::{Card, ChargeOptions, PaymentSource, RefundOptions, StoreOptions, VoidOptions},
};

/// Pin requires a description on every charge.
pub const DEFAULT_DESCRIPTION: &str = "Paygate payment";

pub fn build_auth_or_purchase(
    amount: Amount,
    source: &PaymentSource,
    options: &ChargeOptions,
    capture: bool,
    default_currency: &str,
) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert("amount", amount.value().to_string());
    params.insert("currency", options.currency_or(default_currency).to_ascii_uppercase());
    params.insert("description", options.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION));
    params.insert_opt("email", options.email.as_deref());
    params.insert_opt("ip_address", options.ip_address.as_deref());
    params.insert("capture", capture.to_string());
    params.insert_opt(nested("metadata", "order_id"), options.order_id.as_deref());
    for (key, value) in &options.metadata {
        params.insert(nested("metadata", key), value.as_str());
    }
    match source {
        PaymentSource::Card(card) => add_card(&mut params, card),
        // Card tokens come from Pin's card API, everything else is treated as a customer token.
        PaymentSource::Token(token) if token.starts_with("card_") => params.insert("card_token", token.as_str()),
        PaymentSource::Token(token) => params.insert("customer_token", token.as_str()),
    }
    ApiCall::new(Method::POST, "/charges", params)
}

pub fn build_capture(token: &str, amount: Amount) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert("amount", amount.value().to_string());
    ApiCall::new(Method::PUT, format!("/charges/{}/capture", urlencoding::encode(token)), params)
}

pub fn build_refund(token: &str, amount: Amount, _options: &RefundOptions) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert("amount", amount.value().to_string());
    ApiCall::new(Method::POST, format!("/charges/{}/refunds", urlencoding::encode(token)), params)
}

pub fn build_void(token: &str, _options: &VoidOptions) -> ApiCall {
    ApiCall::new(Method::PUT, format!("/charges/{}/void", urlencoding::encode(token)), ParamSet::new())
}

pub fn build_store(card: &Card, options: &StoreOptions) -> ApiCall {
    let mut params = ParamSet::new();
    params.insert_opt("email", options.email.as_deref());
    add_card(&mut params, card);
    ApiCall::new(Method::POST, "/customers", params)
}

pub fn build_unstore(token: &str) -> ApiCall {
    ApiCall::new(Method::DELETE, format!("/customers/{}", urlencoding::encode(token)), ParamSet::new())
}

fn add_card(params: &mut ParamSet, card: &Card) {
    params.insert_masked(nested("card", "number"), &card.number);
    params.insert(nested("card", "expiry_month"), format!("{:02}", card.expiry_month));
    params.insert(nested("card", "expiry_year"), card.expiry_year.to_string());
    params.insert_masked(nested("card", "cvc"), &card.cvc);
    params.insert(nested("card", "name"), card.holder_name.as_str());
    if let Some(address) = &card.address {
        params.insert_opt(nested("card", "address_line1"), address.line1.as_deref());
        params.insert_opt(nested("card", "address_line2"), address.line2.as_deref());
        params.insert_opt(nested("card", "address_city"), address.city.as_deref());
        params.insert_opt(nested("card", "address_postcode"), address.postcode.as_deref());
        params.insert_opt(nested("card", "address_state"), address.state.as_deref());
        params.insert_opt(nested("card", "address_country"), address.country.as_deref());
    }
}
