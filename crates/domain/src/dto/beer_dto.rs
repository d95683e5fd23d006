use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// External view of a beer.
///
/// The style travels as a plain string and quantity-on-hand is only present
/// when it was explicitly requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    pub id: Option<i32>,
    pub version: Option<i64>,

    #[validate(length(min = 3, max = 100, message = "Beer name must be between 3 and 100 characters"))]
    pub beer_name: String,

    #[validate(length(min = 1, message = "Beer style cannot be empty"))]
    pub beer_style: String,

    #[validate(length(min = 1, message = "UPC cannot be empty"))]
    pub upc: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i32>,

    #[validate(range(min = 0.01, message = "Price must be greater than 0"))]
    pub price: f64,

    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl BeerDto {
    /// Build a DTO for a beer that has not been saved yet
    pub fn new(
        beer_name: impl Into<String>,
        beer_style: impl Into<String>,
        upc: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: None,
            version: None,
            beer_name: beer_name.into(),
            beer_style: beer_style.into(),
            upc: upc.into(),
            quantity_on_hand: None,
            price,
            created_date: None,
            last_modified_date: None,
        }
    }
}
