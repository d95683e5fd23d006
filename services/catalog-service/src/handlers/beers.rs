use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use catalog::{BeerFilter, DeleteOutcome};
use domain::dto::paging::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use domain::{BeerDto, BeerPagedList, BeerStyle, PageRequest};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{api_error, catalog_error, ApiError};
use crate::state::AppState;

pub const BEER_PATH: &str = "/api/v1/beer";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBeersParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    pub show_inventory_on_hand: Option<bool>,
}

impl ListBeersParams {
    fn to_filter(&self) -> Result<BeerFilter, ApiError> {
        let page = PageRequest::new(
            self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

        let mut filter = BeerFilter::new(page);
        if let Some(name) = &self.beer_name {
            filter = filter.with_name(name.clone());
        }
        if let Some(style) = self.beer_style.as_deref().filter(|s| !s.is_empty()) {
            let style: BeerStyle = style
                .parse()
                .map_err(|e: domain::DomainError| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
            filter = filter.with_style(style);
        }

        Ok(filter)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryParams {
    pub show_inventory_on_hand: Option<bool>,
}

pub async fn list_beers(
    State(state): State<AppState>,
    Query(params): Query<ListBeersParams>,
) -> Result<Json<BeerPagedList>, ApiError> {
    let filter = params.to_filter()?;

    let page = state
        .beers
        .list_beers(&filter, params.show_inventory_on_hand.unwrap_or(false))
        .await
        .map_err(|e| catalog_error("list beers", e))?;

    Ok(Json(page))
}

pub async fn get_beer_by_id(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
    Query(params): Query<InventoryParams>,
) -> Result<Json<BeerDto>, ApiError> {
    match state
        .beers
        .get_by_id(beer_id, params.show_inventory_on_hand.unwrap_or(false))
        .await
    {
        Ok(Some(beer)) => Ok(Json(beer)),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Beer not found: {}", beer_id),
        )),
        Err(e) => Err(catalog_error("fetch beer", e)),
    }
}

pub async fn get_beer_by_upc(
    State(state): State<AppState>,
    Path(upc): Path<String>,
) -> Result<Json<BeerDto>, ApiError> {
    match state.beers.get_by_upc(&upc).await {
        Ok(Some(beer)) => Ok(Json(beer)),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Beer not found with UPC: {}", upc),
        )),
        Err(e) => Err(catalog_error("fetch beer by UPC", e)),
    }
}

/// Create a beer; the response carries only the new resource's location
pub async fn create_beer(
    State(state): State<AppState>,
    Json(beer): Json<BeerDto>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&beer)?;

    let saved = state
        .beers
        .save_new_beer(beer)
        .await
        .map_err(|e| catalog_error("save beer", e))?;

    let beer_id = saved.id.ok_or_else(|| {
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Saved beer has no id")
    })?;
    let location = format!("{}/{}", BEER_PATH, beer_id);
    info!("Created beer at {}", location);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

pub async fn update_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
    Json(beer): Json<BeerDto>,
) -> Result<StatusCode, ApiError> {
    validate(&beer)?;

    match state.beers.update_beer(beer_id, beer).await {
        Ok(Some(_)) => Ok(StatusCode::NO_CONTENT),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Beer not found: {}", beer_id),
        )),
        Err(e) => Err(catalog_error("update beer", e)),
    }
}

pub async fn delete_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    match state.beers.delete_beer_by_id(beer_id).await {
        Ok(DeleteOutcome::Deleted) => Ok(StatusCode::NO_CONTENT),
        Ok(DeleteOutcome::NotFound) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Beer not found: {}", beer_id),
        )),
        Err(e) => Err(catalog_error("delete beer", e)),
    }
}

fn validate(beer: &BeerDto) -> Result<(), ApiError> {
    beer.validate()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Validation error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_params_missing() {
        let filter = ListBeersParams::default().to_filter().unwrap();
        assert_eq!(filter.page, PageRequest::default());
        assert!(filter.beer_name.is_none());
        assert!(filter.beer_style.is_none());
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let params = ListBeersParams {
            beer_style: Some("BARLEYWINE".to_string()),
            ..Default::default()
        };
        let (status, _) = params.to_filter().unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let params = ListBeersParams {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(params.to_filter().is_err());
    }

    #[test]
    fn test_query_params_use_camel_case() {
        let params: ListBeersParams =
            serde_json::from_str(r#"{"beerName":"Mango","beerStyle":"IPA","pageSize":5}"#).unwrap();
        let filter = params.to_filter().unwrap();
        assert_eq!(filter.beer_name.as_deref(), Some("Mango"));
        assert_eq!(filter.beer_style, Some(BeerStyle::Ipa));
        assert_eq!(filter.page.page_size, 5);
    }
}
