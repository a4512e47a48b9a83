use std::{collections::HashMap, sync::Mutex};

use chrono::{SecondsFormat, Utc};
use log::*;
use paygate_common::Secret;
use reqwest::Method;
use serde_json::{json, Value};

use super::lock;
use crate::{
    helpers::basic_auth,
    params::ParamSet,
    transport::{HttpRequest, HttpResponse, Transport, TransportError},
};

/// Pin's test card that is always declined.
pub const DECLINED_CARD: &str = "4100000000000001";

#[derive(Debug, Clone)]
struct SimCharge {
    amount: i64,
    currency: String,
    email: Option<String>,
    description: String,
    captured: bool,
    voided: bool,
    refunded: i64,
    created_at: String,
}

#[derive(Debug, Default)]
struct SimState {
    charges: HashMap<String, SimCharge>,
    customers: HashMap<String, Option<String>>,
}

/// An in-memory stand-in for the Pin Payments API.
///
/// It answers the same routes the Pin adapter calls, with Pin's envelope and error shapes, and it keeps just enough
/// state to enforce the remote rules the adapter leaves to the gateway:
/// * a capture may not exceed the authorized amount, and a charge is captured at most once;
/// * refunds are only allowed on captured charges and may not exceed the captured amount in total;
/// * only uncaptured charges can be voided;
/// * every stored card gets a fresh customer token, even when the card data is identical.
#[derive(Debug)]
pub struct PinSimulator {
    authorization: Secret<String>,
    state: Mutex<SimState>,
}

type Reply = (u16, String);

fn reply(status: u16, body: Value) -> Reply {
    (status, body.to_string())
}

fn error(status: u16, code: &str, description: &str) -> Reply {
    reply(status, json!({"error": code, "error_description": description}))
}

fn invalid(param: &str, message: &str) -> Reply {
    reply(
        422,
        json!({
            "error": "invalid_resource",
            "error_description": "One or more parameters were missing or invalid",
            "messages": [{"param": param, "code": format!("{param}_invalid"), "message": message}]
        }),
    )
}

fn not_found() -> Reply {
    error(404, "resource_not_found", "No resource was found at this URL.")
}

fn new_token(prefix: &str) -> String {
    format!("{prefix}_{:016x}", rand::random::<u64>())
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_amount(params: &ParamSet) -> Result<i64, Reply> {
    params
        .get("amount")
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|a| *a >= 100)
        .ok_or_else(|| invalid("amount", "Amount must be at least 100 cents"))
}

impl SimCharge {
    fn to_json(&self, token: &str) -> Value {
        json!({
            "token": token,
            "success": true,
            "amount": self.amount,
            "currency": self.currency,
            "description": self.description,
            "email": self.email,
            "created_at": self.created_at,
            "status_message": "Success",
            "error_message": null,
            "captured": self.captured,
            "amount_refunded": self.refunded,
        })
    }
}

impl PinSimulator {
    /// A simulator that only accepts requests authenticated with `api_key`.
    pub fn new(api_key: &str) -> Self {
        Self { authorization: basic_auth(&Secret::from(api_key), ""), state: Mutex::new(SimState::default()) }
    }

    /// Answers one request. `path` is relative to the API root, e.g. `/charges/ch_1/capture`.
    pub fn handle(&self, method: &Method, path: &str, authorization: Option<&str>, params: &ParamSet) -> Reply {
        if authorization != Some(self.authorization.reveal().as_str()) {
            return error(401, "unauthenticated", "Not authorised. (Check API Key)");
        }
        let segments = path.trim_matches('/').split('/').collect::<Vec<_>>();
        let mut state = lock(&self.state);
        let result = match (method.as_str(), segments.as_slice()) {
            ("POST", ["charges"]) => create_charge(&mut state, params),
            ("PUT", ["charges", token, "capture"]) => capture_charge(&mut state, token, params),
            ("POST", ["charges", token, "refunds"]) => refund_charge(&mut state, token, params),
            ("PUT", ["charges", token, "void"]) => void_charge(&mut state, token),
            ("POST", ["customers"]) => create_customer(&mut state, params),
            ("DELETE", ["customers", token]) => delete_customer(&mut state, token),
            _ => Err(not_found()),
        };
        let (status, body) = result.unwrap_or_else(|e| e);
        debug!("🧪️ Pin simulator: {method} {path} -> {status}");
        (status, body)
    }

    pub fn charge_count(&self) -> usize {
        lock(&self.state).charges.len()
    }

    pub fn customer_count(&self) -> usize {
        lock(&self.state).customers.len()
    }
}

fn create_charge(state: &mut SimState, params: &ParamSet) -> Result<Reply, Reply> {
    let amount = parse_amount(params)?;
    let description = params.get("description").ok_or_else(|| invalid("description", "Description can't be blank"))?;
    let currency = params.get("currency").unwrap_or("AUD").to_string();
    let mut email = params.get("email").map(String::from);
    if let Some(customer) = params.get("customer_token") {
        let stored_email = state.customers.get(customer).ok_or_else(not_found)?;
        email = email.or_else(|| stored_email.clone());
    } else if let Some(number) = params.get("card[number]") {
        if number == DECLINED_CARD {
            return Err(error(400, "card_declined", "The card was declined"));
        }
        if email.is_none() {
            return Err(invalid("email", "Email can't be blank"));
        }
    } else if params.get("card_token").is_none() {
        return Err(invalid("card", "Card can't be blank"));
    }
    let charge = SimCharge {
        amount,
        currency,
        email,
        description: description.to_string(),
        captured: params.get("capture") != Some("false"),
        voided: false,
        refunded: 0,
        created_at: now(),
    };
    let token = new_token("ch");
    let body = json!({"response": charge.to_json(&token)});
    state.charges.insert(token, charge);
    Ok(reply(201, body))
}

fn capture_charge(state: &mut SimState, token: &str, params: &ParamSet) -> Result<Reply, Reply> {
    let amount = parse_amount(params)?;
    let charge = state.charges.get_mut(token).ok_or_else(not_found)?;
    if charge.captured {
        return Err(error(422, "invalid_resource", "Charge has already been captured"));
    }
    if charge.voided {
        return Err(error(422, "invalid_resource", "Charge has been voided"));
    }
    if amount > charge.amount {
        return Err(invalid("amount", "Capture amount exceeds the authorised amount"));
    }
    charge.amount = amount;
    charge.captured = true;
    Ok(reply(201, json!({"response": charge.to_json(token)})))
}

fn refund_charge(state: &mut SimState, token: &str, params: &ParamSet) -> Result<Reply, Reply> {
    let amount = parse_amount(params)?;
    let charge = state.charges.get_mut(token).ok_or_else(not_found)?;
    if !charge.captured {
        return Err(error(422, "invalid_resource", "Charge has not been captured"));
    }
    if charge.refunded + amount > charge.amount {
        return Err(invalid("amount", "Refund amount is more than the balance of the charge"));
    }
    charge.refunded += amount;
    let body = json!({"response": {
        "token": new_token("rf"),
        "success": null,
        "amount": amount,
        "currency": charge.currency,
        "charge": token,
        "created_at": now(),
        "error_message": null,
        "status_message": "Pending",
    }});
    Ok(reply(201, body))
}

fn void_charge(state: &mut SimState, token: &str) -> Result<Reply, Reply> {
    let charge = state.charges.get_mut(token).ok_or_else(not_found)?;
    if charge.captured || charge.voided {
        return Err(error(422, "invalid_resource", "Only uncaptured charges can be voided"));
    }
    charge.voided = true;
    Ok(reply(200, json!({"response": charge.to_json(token)})))
}

fn create_customer(state: &mut SimState, params: &ParamSet) -> Result<Reply, Reply> {
    let email = params.get("email").ok_or_else(|| invalid("email", "Email can't be blank"))?;
    let number = params.get("card[number]").ok_or_else(|| invalid("card", "Card can't be blank"))?;
    let token = new_token("cus");
    let last_four = number.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect::<String>();
    let body = json!({"response": {
        "token": token,
        "email": email,
        "created_at": now(),
        "card": {"token": new_token("card"), "display_number": format!("XXXX-XXXX-XXXX-{last_four}")},
    }});
    state.customers.insert(token, Some(email.to_string()));
    Ok(reply(201, body))
}

fn delete_customer(state: &mut SimState, token: &str) -> Result<Reply, Reply> {
    state.customers.remove(token).ok_or_else(not_found)?;
    Ok((204, String::new()))
}

impl Transport for PinSimulator {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = url::Url::parse(&request.url).map_err(|e| TransportError::Request(e.to_string()))?;
        let path = url.path();
        let path = path.strip_prefix("/1").unwrap_or(path);
        let authorization = request.authorization.as_ref().map(|a| a.reveal().as_str());
        let params = request.body.clone().unwrap_or_default();
        let (status, body) = self.handle(&request.method, path, authorization, &params);
        Ok(HttpResponse::new(status, body))
    }
}
