use std::env;

use anyhow::{anyhow, Result};
use log::*;
use paygate_common::{helpers::parse_boolean_flag, Amount};
use paygate_engine::{
    CaptureOptions,
    ChargeOptions,
    Gateway,
    GatewayAdapter,
    GatewayConfig,
    GatewayError,
    PaymentSource,
    RefundOptions,
    ReqwestTransport,
    StoreOptions,
    Transaction,
    TransportConfig,
    VoidOptions,
};
use serde_json::json;

use crate::{
    profile_manager::{read_config, write_config, Profile},
    ChargeParams,
    Command,
    ProfileCommand,
};

fn resolve_config(profile: Option<&str>) -> Result<GatewayConfig> {
    match profile {
        Some(name) => {
            let data = read_config()?;
            let profile = data.find(name).ok_or_else(|| anyhow!("No profile named {name}"))?;
            info!("Using profile {name} ({} gateway)", profile.gateway);
            profile.gateway_config()
        },
        None => Ok(GatewayConfig::from_env_or_default()?),
    }
}

fn charge_request(params: ChargeParams) -> Result<(Amount, PaymentSource, ChargeOptions)> {
    let source = match (&params.token, params.card.is_empty()) {
        (Some(token), _) => PaymentSource::Token(token.clone()),
        (None, false) => PaymentSource::Card(params.card.to_card()?),
        (None, true) => return Err(anyhow!("Provide either --token or the card details (--number, --expiry, ...)")),
    };
    let options = ChargeOptions {
        email: params.email,
        ip_address: params.ip_address,
        description: params.description,
        currency: params.currency,
        order_id: params.order_id,
        metadata: params.metadata,
    };
    Ok((Amount::from(params.amount), source, options))
}

pub async fn run_operation(profile: Option<&str>, command: Command) -> Result<()> {
    let config = resolve_config(profile)?;
    let transport = ReqwestTransport::new(&TransportConfig::from_env_or_default())?;
    let gateway = Gateway::new(config, transport)?;
    let result = match command {
        Command::Authorize(params) => {
            let (amount, source, options) = charge_request(params)?;
            gateway.authorize(amount, &source, &options).await
        },
        Command::Purchase(params) => {
            let (amount, source, options) = charge_request(params)?;
            gateway.purchase(amount, &source, &options).await
        },
        Command::Capture(params) => {
            let options = CaptureOptions { order_id: params.order_id };
            gateway.capture(&params.token, Amount::from(params.amount), &options).await
        },
        Command::Refund(params) => {
            let options = RefundOptions { order_id: params.order_id, reason: params.reason };
            gateway.refund(Amount::from(params.amount), &params.token, &options).await
        },
        Command::Void(params) => gateway.void(&params.token, &VoidOptions { order_id: params.order_id }).await,
        Command::Store(params) => {
            let card = params.card.to_card()?;
            let options =
                StoreOptions { email: params.email, description: params.description, order_id: params.order_id };
            gateway.store(&card, &options).await
        },
        Command::Unstore { token } => gateway.unstore(&token).await,
        Command::Env | Command::Profile(_) => return Err(anyhow!("Not a gateway operation")),
    };
    print_result(&result)?;
    result.map(|_| ()).map_err(|e| anyhow!("The {} operation failed. {e}", gateway.gateway_name()))
}

fn print_result(result: &Result<Transaction, GatewayError>) -> Result<()> {
    let value = match result {
        Ok(tx) => json!({ "success": true, "transaction": tx }),
        Err(e) => json!({
            "success": false,
            "error": {
                "kind": e.kind(),
                "status": e.status(),
                "reason": e.reason(),
                "detail": e.detail(),
                "retryable": e.is_retryable(),
            }
        }),
    };
    let pretty = parse_boolean_flag(env::var("PAYGATE_PRETTY_JSON").ok(), true);
    let text = if pretty { serde_json::to_string_pretty(&value)? } else { serde_json::to_string(&value)? };
    println!("{text}");
    Ok(())
}

pub fn run_profile_command(command: ProfileCommand) -> Result<()> {
    let mut data = read_config()?;
    match command {
        ProfileCommand::List => {
            if data.profiles.is_empty() {
                println!("No profiles have been saved yet. Add one with `paygate profile add`.");
            }
            for p in &data.profiles {
                println!(
                    "{:<15} {:<7} key from ${:<30} {} {}",
                    p.name,
                    p.gateway,
                    p.api_key_envar,
                    p.base_url.as_deref().unwrap_or("(default URL)"),
                    p.default_currency.as_deref().unwrap_or("")
                );
            }
        },
        ProfileCommand::Add(params) => {
            let profile = Profile {
                name: params.name,
                gateway: params.gateway,
                api_key_envar: params.api_key_envar,
                base_url: params.base_url,
                default_currency: params.currency,
            };
            println!("Saved profile {}", profile.name);
            data.upsert(profile);
            write_config(&data)?;
        },
        ProfileCommand::Remove { name } => {
            if !data.remove(&name) {
                return Err(anyhow!("No profile named {name}"));
            }
            write_config(&data)?;
            println!("Removed profile {name}");
        },
    }
    Ok(())
}
