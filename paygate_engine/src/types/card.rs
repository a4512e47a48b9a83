use std::fmt::{self, Debug};

use paygate_common::{helpers::mask_card_number, Secret};

/// Billing address attached to a card. Gateways decide which fields they require.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub state: Option<String>,
    /// ISO 3166 country code or name, passed through as given.
    pub country: Option<String>,
}

/// Raw card data supplied by the caller.
///
/// The card is opaque input: the engine never validates it (that is the gateway's job), never logs it and never
/// stores it. `Debug` output only shows the last four digits of the number and never the verification code.
#[derive(Clone, Default)]
pub struct Card {
    pub holder_name: String,
    pub number: Secret<String>,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cvc: Secret<String>,
    pub address: Option<Address>,
}

impl Card {
    pub fn new(holder_name: &str, number: &str, expiry_month: u8, expiry_year: u16, cvc: &str) -> Self {
        Self {
            holder_name: holder_name.to_string(),
            number: Secret::from(number),
            expiry_month,
            expiry_year,
            cvc: Secret::from(cvc),
            address: None,
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn masked_number(&self) -> String {
        mask_card_number(self.number.reveal())
    }
}

impl Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.masked_number())
            .field("expiry", &format_args!("{:02}/{}", self.expiry_month, self.expiry_year))
            .finish_non_exhaustive()
    }
}

/// What pays for an authorize or purchase: a raw card, or a token from an earlier `store` call.
#[derive(Debug, Clone)]
pub enum PaymentSource {
    Card(Card),
    Token(String),
}

impl From<Card> for PaymentSource {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

impl From<&str> for PaymentSource {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}
