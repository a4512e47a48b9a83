use clap::{Args, Parser, Subcommand};
use log::*;

mod card_args;
mod envs;
mod operations;
mod profile_manager;

use crate::{card_args::CardArgs, operations::run_operation};

#[derive(Parser, Debug)]
#[command(version, about = "Authorize, capture, refund and store cards against a payment gateway")]
pub struct Arguments {
    /// Use a saved profile instead of the PAYGATE_* environment variables
    #[arg(short, long, global = true)]
    profile: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reserve funds on a card or stored token without capturing them
    Authorize(ChargeParams),
    /// Authorize and capture in one step
    Purchase(ChargeParams),
    /// Capture a previous authorization
    Capture(CaptureParams),
    /// Refund part or all of a captured charge
    Refund(RefundParams),
    /// Release an uncaptured authorization
    Void(VoidParams),
    /// Store a card and print the reusable token
    Store(StoreParams),
    /// Delete a stored card
    Unstore {
        token: String,
    },
    /// Print the current (non-secret) configuration
    Env,
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Debug, Args)]
pub struct ChargeParams {
    /// The amount in minor units (cents)
    #[arg(short, long)]
    pub amount: i64,
    #[command(flatten)]
    pub card: CardArgs,
    /// Charge a stored customer or card token instead of a card
    #[arg(short, long, conflicts_with = "number")]
    pub token: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(long)]
    pub ip_address: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Overrides the gateway's default currency
    #[arg(short, long)]
    pub currency: Option<String>,
    /// Your reference for the charge. Passed to the gateway unchanged (as the idempotency key where supported).
    #[arg(short, long)]
    pub order_id: Option<String>,
    /// Extra metadata, as key=value
    #[arg(short, long = "meta", value_parser = parse_key_value)]
    pub metadata: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct CaptureParams {
    pub token: String,
    #[arg(short, long)]
    pub amount: i64,
    #[arg(short, long)]
    pub order_id: Option<String>,
}

#[derive(Debug, Args)]
pub struct RefundParams {
    pub token: String,
    #[arg(short, long)]
    pub amount: i64,
    #[arg(short, long)]
    pub reason: Option<String>,
    #[arg(short, long)]
    pub order_id: Option<String>,
}

#[derive(Debug, Args)]
pub struct VoidParams {
    pub token: String,
    #[arg(short, long)]
    pub order_id: Option<String>,
}

#[derive(Debug, Args)]
pub struct StoreParams {
    #[command(flatten)]
    pub card: CardArgs,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub order_id: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// List the saved profiles
    List,
    /// Save a profile, replacing any profile with the same name
    Add(ProfileParams),
    /// Delete a saved profile
    Remove { name: String },
}

#[derive(Debug, Args)]
pub struct ProfileParams {
    pub name: String,
    /// pin or stripe
    #[arg(short, long)]
    pub gateway: paygate_engine::GatewayKind,
    /// The environment variable that holds the API key
    #[arg(short = 'k', long)]
    pub api_key_envar: String,
    #[arg(short, long)]
    pub base_url: Option<String>,
    #[arg(short, long)]
    pub currency: Option<String>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("'{s}' is not a key=value pair"))
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let result = match cli.command {
        Command::Env => {
            envs::display_envs();
            Ok(())
        },
        Command::Profile(cmd) => operations::run_profile_command(cmd),
        command => run_operation(cli.profile.as_deref(), command).await,
    };
    if let Err(e) = result {
        error!("{e:#}");
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
