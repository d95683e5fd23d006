//! Field-by-field mapping between stored records and view models.

use crate::dto::BeerDto;
use crate::entities::{Beer, BeerStyle};
use crate::errors::DomainError;

/// Map a beer to its public view, hiding quantity-on-hand
pub fn beer_to_dto(beer: &Beer) -> BeerDto {
    BeerDto {
        id: beer.id,
        version: beer.version,
        beer_name: beer.beer_name.clone(),
        beer_style: beer.beer_style.as_str().to_string(),
        upc: beer.upc.clone(),
        quantity_on_hand: None,
        price: beer.price,
        created_date: beer.created_date,
        last_modified_date: beer.last_modified_date,
    }
}

/// Map a beer to its public view including quantity-on-hand
pub fn beer_to_dto_with_inventory(beer: &Beer) -> BeerDto {
    BeerDto {
        quantity_on_hand: beer.quantity_on_hand,
        ..beer_to_dto(beer)
    }
}

/// Map an incoming DTO to a record. Fails if the style name is unknown.
pub fn dto_to_beer(dto: &BeerDto) -> Result<Beer, DomainError> {
    let beer_style: BeerStyle = dto.beer_style.parse()?;

    Ok(Beer {
        id: dto.id,
        version: dto.version,
        beer_name: dto.beer_name.clone(),
        beer_style,
        upc: dto.upc.clone(),
        quantity_on_hand: dto.quantity_on_hand,
        price: dto.price,
        created_date: dto.created_date,
        last_modified_date: dto.last_modified_date,
    })
}
