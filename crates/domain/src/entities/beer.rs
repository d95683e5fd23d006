use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Beer styles known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    pub const ALL: [BeerStyle; 10] = [
        BeerStyle::Lager,
        BeerStyle::Pilsner,
        BeerStyle::Stout,
        BeerStyle::Gose,
        BeerStyle::Porter,
        BeerStyle::Ale,
        BeerStyle::Wheat,
        BeerStyle::Ipa,
        BeerStyle::PaleAle,
        BeerStyle::Saison,
    ];

    /// Wire and storage name of the style
    pub fn as_str(&self) -> &'static str {
        match self {
            BeerStyle::Lager => "LAGER",
            BeerStyle::Pilsner => "PILSNER",
            BeerStyle::Stout => "STOUT",
            BeerStyle::Gose => "GOSE",
            BeerStyle::Porter => "PORTER",
            BeerStyle::Ale => "ALE",
            BeerStyle::Wheat => "WHEAT",
            BeerStyle::Ipa => "IPA",
            BeerStyle::PaleAle => "PALE_ALE",
            BeerStyle::Saison => "SAISON",
        }
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| DomainError::UnknownBeerStyle(s.to_string()))
    }
}

/// Stored beer record.
///
/// `id` stays `None` until the record is first persisted. `version`,
/// `created_date` and `last_modified_date` are owned by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beer {
    pub id: Option<i32>,
    pub version: Option<i64>,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: f64,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl Beer {
    /// Create an unsaved beer
    pub fn new(beer_name: impl Into<String>, beer_style: BeerStyle, upc: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            version: None,
            beer_name: beer_name.into(),
            beer_style,
            upc: upc.into(),
            quantity_on_hand: None,
            price,
            created_date: None,
            last_modified_date: None,
        }
    }

    pub fn with_quantity_on_hand(mut self, quantity: i32) -> Self {
        self.quantity_on_hand = Some(quantity);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
