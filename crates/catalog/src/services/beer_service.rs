use std::sync::Arc;
use std::time::Instant;

use common::metrics;
use domain::mappers::{beer_to_dto, beer_to_dto_with_inventory, dto_to_beer};
use domain::{Beer, BeerDto, BeerPagedList};
use tracing::{error, info};

use crate::cache::{CacheName, CatalogCache};
use crate::criteria::BeerFilter;
use crate::repositories::BeerRepository;
use crate::CatalogError;

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Beer catalog operations.
///
/// Listing and id lookups are cached unless quantity-on-hand is requested;
/// UPC lookups are always cached. Writes never touch the cache, so cached
/// reads may trail storage until their entries expire.
#[derive(Clone)]
pub struct BeerService {
    repository: Arc<dyn BeerRepository>,
    cache: CatalogCache,
}

impl BeerService {
    pub fn new(repository: Arc<dyn BeerRepository>, cache: CatalogCache) -> Self {
        Self { repository, cache }
    }

    /// List one page of beers matching the filter
    pub async fn list_beers(
        &self,
        filter: &BeerFilter,
        show_inventory_on_hand: bool,
    ) -> Result<BeerPagedList, CatalogError> {
        info!(
            "Listing beers (name: {:?}, style: {:?}, page: {}, size: {}, inventory: {})",
            filter.beer_name,
            filter.beer_style,
            filter.page.page_number,
            filter.page.page_size,
            show_inventory_on_hand
        );

        let start = Instant::now();
        let result = if show_inventory_on_hand {
            self.load_page(filter, true).await
        } else {
            self.cache
                .get_or_compute(CacheName::BeerList, &filter.cache_key(), || {
                    self.load_page(filter, false)
                })
                .await
        };

        record("list_beers", &result, start);
        result
    }

    async fn load_page(
        &self,
        filter: &BeerFilter,
        show_inventory_on_hand: bool,
    ) -> Result<BeerPagedList, CatalogError> {
        let beers = self.repository.find(&filter.criteria(), filter.page).await?;
        let content = beers
            .iter()
            .map(|beer| to_dto(beer, show_inventory_on_hand))
            .collect();

        Ok(BeerPagedList::new(content, filter.page))
    }

    /// Look up a beer by id
    pub async fn get_by_id(
        &self,
        beer_id: i32,
        show_inventory_on_hand: bool,
    ) -> Result<Option<BeerDto>, CatalogError> {
        info!("Fetching beer: {} (inventory: {})", beer_id, show_inventory_on_hand);

        let start = Instant::now();
        let result = if show_inventory_on_hand {
            self.load_by_id(beer_id, true).await
        } else {
            self.cache
                .get_or_load(CacheName::Beer, &beer_id.to_string(), || {
                    self.load_by_id(beer_id, false)
                })
                .await
        };

        record("get_beer_by_id", &result, start);
        result
    }

    async fn load_by_id(
        &self,
        beer_id: i32,
        show_inventory_on_hand: bool,
    ) -> Result<Option<BeerDto>, CatalogError> {
        let beer = self.repository.find_by_id(beer_id).await?;
        Ok(beer.map(|beer| to_dto(&beer, show_inventory_on_hand)))
    }

    /// Look up a beer by UPC. Always served through the cache.
    pub async fn get_by_upc(&self, upc: &str) -> Result<Option<BeerDto>, CatalogError> {
        info!("Fetching beer by UPC: {}", upc);

        let start = Instant::now();
        let result = self
            .cache
            .get_or_load(CacheName::BeerUpc, upc, || async {
                let beer = self.repository.find_by_upc(upc).await?;
                Ok(beer.as_ref().map(beer_to_dto))
            })
            .await;

        record("get_beer_by_upc", &result, start);
        result
    }

    /// Insert a new beer
    pub async fn save_new_beer(&self, beer_dto: BeerDto) -> Result<BeerDto, CatalogError> {
        let start = Instant::now();
        let result = self.insert(beer_dto).await;

        match &result {
            Ok(saved) => info!("Saved new beer: {:?}", saved.id),
            Err(e) => error!("Failed to save new beer: {}", e),
        }
        record("save_new_beer", &result, start);
        result
    }

    async fn insert(&self, beer_dto: BeerDto) -> Result<BeerDto, CatalogError> {
        let beer = Beer {
            id: None,
            version: None,
            ..dto_to_beer(&beer_dto)?
        };

        let saved = self.repository.save(beer).await?;
        Ok(beer_to_dto(&saved))
    }

    /// Overwrite the business fields of an existing beer.
    ///
    /// Returns `None` without writing anything when the id is unknown.
    pub async fn update_beer(
        &self,
        beer_id: i32,
        beer_dto: BeerDto,
    ) -> Result<Option<BeerDto>, CatalogError> {
        let start = Instant::now();
        let result = self.apply_update(beer_id, beer_dto).await;

        match &result {
            Ok(Some(_)) => info!("Updated beer: {}", beer_id),
            Ok(None) => info!("Beer not found for update: {}", beer_id),
            Err(e) => error!("Failed to update beer {}: {}", beer_id, e),
        }
        record("update_beer", &result, start);
        result
    }

    async fn apply_update(
        &self,
        beer_id: i32,
        beer_dto: BeerDto,
    ) -> Result<Option<BeerDto>, CatalogError> {
        let patch = dto_to_beer(&beer_dto)?;

        let Some(mut beer) = self.repository.find_by_id(beer_id).await? else {
            return Ok(None);
        };

        beer.beer_name = patch.beer_name;
        beer.beer_style = patch.beer_style;
        beer.price = patch.price;
        beer.upc = patch.upc;

        let saved = self.repository.save(beer).await?;
        Ok(Some(beer_to_dto(&saved)))
    }

    /// Delete a beer after confirming it exists
    pub async fn delete_beer_by_id(&self, beer_id: i32) -> Result<DeleteOutcome, CatalogError> {
        let start = Instant::now();
        let result = self.verify_and_delete(beer_id).await;

        match &result {
            Ok(DeleteOutcome::Deleted) => info!("Deleted beer: {}", beer_id),
            Ok(DeleteOutcome::NotFound) => info!("Beer not found for delete: {}", beer_id),
            Err(e) => error!("Failed to delete beer {}: {}", beer_id, e),
        }
        record("delete_beer", &result, start);
        result
    }

    async fn verify_and_delete(&self, beer_id: i32) -> Result<DeleteOutcome, CatalogError> {
        let Some(beer) = self.repository.find_by_id(beer_id).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        self.repository.delete_by_id(beer.id.unwrap_or(beer_id)).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

fn to_dto(beer: &Beer, show_inventory_on_hand: bool) -> BeerDto {
    if show_inventory_on_hand {
        beer_to_dto_with_inventory(beer)
    } else {
        beer_to_dto(beer)
    }
}

fn record<T>(query_type: &str, result: &Result<T, CatalogError>, start: Instant) {
    metrics::record_query(query_type, result.is_ok(), start.elapsed().as_secs_f64());
}
