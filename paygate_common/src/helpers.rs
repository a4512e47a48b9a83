/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// True if `code` looks like an ISO 4217 alphabetic currency code (three ASCII letters, any case).
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Shows only the last four digits of a card number, e.g. `XXXX-XXXX-XXXX-4242`.
pub fn mask_card_number(number: &str) -> String {
    let digits = number.chars().filter(char::is_ascii_digit).collect::<Vec<char>>();
    if digits.len() < 4 {
        return "XXXX".to_string();
    }
    let last_four = digits[digits.len() - 4..].iter().collect::<String>();
    format!("XXXX-XXXX-XXXX-{last_four}")
}
