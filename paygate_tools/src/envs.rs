use std::{env, env::VarError};

/// Variables that hold secrets. Only whether they are set is shown.
const SECRET_ENVS: [&str; 2] = ["PAYGATE_PIN_API_KEY", "PAYGATE_STRIPE_SECRET_KEY"];

const DISPLAY_ENVS: [&str; 8] = [
    "RUST_LOG",
    "PAYGATE_GATEWAY",
    "PAYGATE_PIN_BASE_URL",
    "PAYGATE_PIN_CURRENCY",
    "PAYGATE_STRIPE_BASE_URL",
    "PAYGATE_STRIPE_CURRENCY",
    "PAYGATE_HTTP_TIMEOUT_SECS",
    "PAYGATE_PRETTY_JSON",
];

fn describe(name: &str) -> String {
    match env::var(name) {
        Ok(s) => s,
        Err(VarError::NotPresent) => "Not set".into(),
        Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
    }
}

fn describe_secret(name: &str) -> &'static str {
    match env::var(name) {
        Ok(s) if !s.trim().is_empty() => "Set (hidden)",
        Ok(_) => "Empty",
        Err(VarError::NotPresent) => "Not set",
        Err(VarError::NotUnicode(_)) => "Invalid value",
    }
}

pub fn display_envs() {
    println!("Current environment values (secrets are not shown):");
    DISPLAY_ENVS.iter().for_each(|&name| println!("  {name:<35} {:<15}", describe(name)));
    SECRET_ENVS.iter().for_each(|&name| println!("  {name:<35} {:<15}", describe_secret(name)));
}
