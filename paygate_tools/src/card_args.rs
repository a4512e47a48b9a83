use std::fmt::{Debug, Formatter};

use anyhow::{anyhow, Result};
use clap::Args;
use paygate_common::helpers::mask_card_number;
use paygate_engine::{Address, Card};

#[derive(Args, Clone, Default)]
pub struct CardArgs {
    /// The card number
    #[arg(long)]
    pub number: Option<String>,
    /// Expiry date as MM/YYYY
    #[arg(long, value_parser = parse_expiry)]
    pub expiry: Option<(u8, u16)>,
    #[arg(long)]
    pub cvc: Option<String>,
    /// The cardholder's name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address_line1: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub postcode: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

impl Debug for CardArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardArgs")
            .field("number", &self.number.as_deref().map(mask_card_number))
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl CardArgs {
    pub fn is_empty(&self) -> bool {
        self.number.is_none()
    }

    pub fn to_card(&self) -> Result<Card> {
        let number = self.number.as_deref().ok_or_else(|| anyhow!("--number is required"))?;
        let (month, year) = self.expiry.ok_or_else(|| anyhow!("--expiry is required"))?;
        let cvc = self.cvc.as_deref().ok_or_else(|| anyhow!("--cvc is required"))?;
        let name = self.name.as_deref().ok_or_else(|| anyhow!("--name is required"))?;
        let card = Card::new(name, number, month, year, cvc);
        let address = Address {
            line1: self.address_line1.clone(),
            line2: None,
            city: self.city.clone(),
            postcode: self.postcode.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
        };
        if address == Address::default() {
            Ok(card)
        } else {
            Ok(card.with_address(address))
        }
    }
}

pub fn parse_expiry(s: &str) -> Result<(u8, u16), String> {
    let (month, year) = s.split_once('/').ok_or_else(|| format!("'{s}' is not in MM/YYYY form"))?;
    let month = month.trim().parse::<u8>().map_err(|e| format!("Invalid month. {e}"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("{month} is not a valid month"));
    }
    let year = year.trim().parse::<u16>().map_err(|e| format!("Invalid year. {e}"))?;
    let year = if year < 100 { 2000 + year } else { year };
    Ok((month, year))
}
