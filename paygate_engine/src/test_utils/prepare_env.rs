use log::*;

use crate::types::{Address, Card};

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}

/// Pin's documented successful test card.
pub fn test_card() -> Card {
    Card::new("Roland Robot", "5520000000000000", 5, 2030, "123").with_address(Address {
        line1: Some("42 Sevenoaks St".into()),
        city: Some("Lathlain".into()),
        postcode: Some("6454".into()),
        state: Some("WA".into()),
        country: Some("Australia".into()),
        ..Default::default()
    })
}
