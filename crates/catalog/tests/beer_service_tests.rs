use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog::{
    BeerCriteria, BeerFilter, BeerRepository, BeerService, CacheStore, CatalogCache, CatalogError,
    DeleteOutcome, InMemoryBeerRepository, InMemoryCache,
};
use domain::{Beer, BeerDto, BeerStyle, PageRequest};
use mockall::mock;
use mockall::predicate::eq;

mock! {
    pub BeerRepo {}

    #[async_trait]
    impl BeerRepository for BeerRepo {
        async fn find(&self, criteria: &BeerCriteria, page: PageRequest) -> Result<Vec<Beer>, CatalogError>;
        async fn find_by_id(&self, id: i32) -> Result<Option<Beer>, CatalogError>;
        async fn find_by_upc(&self, upc: &str) -> Result<Option<Beer>, CatalogError>;
        async fn save(&self, beer: Beer) -> Result<Beer, CatalogError>;
        async fn delete_by_id(&self, id: i32) -> Result<(), CatalogError>;
    }
}

struct BrokenCache;

#[async_trait]
impl CacheStore for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CatalogError> {
        Err(CatalogError::CacheError("connection reset".to_string()))
    }

    async fn put(&self, _key: &str, _value: String) -> Result<(), CatalogError> {
        Err(CatalogError::CacheError("connection reset".to_string()))
    }
}

fn fresh_cache() -> CatalogCache {
    CatalogCache::new(Arc::new(InMemoryCache::new(Duration::from_secs(300))))
}

fn stored_beer(id: i32) -> Beer {
    Beer {
        id: Some(id),
        version: Some(0),
        ..Beer::new("Mango Bobs", BeerStyle::Ale, "0631234200036", 12.95).with_quantity_on_hand(122)
    }
}

fn service_with_mock(repository: MockBeerRepo) -> BeerService {
    BeerService::new(Arc::new(repository), fresh_cache())
}

async fn seeded_service() -> (BeerService, Arc<InMemoryBeerRepository>) {
    let repository = Arc::new(InMemoryBeerRepository::new());
    let beers = [
        ("Mango Bobs", BeerStyle::Ale, "0631234200036"),
        ("Galaxy Cat", BeerStyle::PaleAle, "9122089364369"),
        ("Mango Haze", BeerStyle::Ipa, "5677465691934"),
        ("Very Hazy", BeerStyle::Ipa, "5339741428398"),
        ("Pinball Porter", BeerStyle::Porter, "0083783375213"),
        ("Mango Porter", BeerStyle::Porter, "6266328524787"),
        ("Old Ale", BeerStyle::Ale, "7490217802727"),
    ];
    for (name, style, upc) in beers {
        repository
            .save(Beer::new(name, style, upc, 11.0).with_quantity_on_hand(10))
            .await
            .unwrap();
    }

    let service = BeerService::new(repository.clone(), fresh_cache());
    (service, repository)
}

#[tokio::test]
async fn list_without_filters_matches_unfiltered_scan() {
    let (service, repository) = seeded_service().await;
    let page = PageRequest::new(1, 3).unwrap();

    let listed = service.list_beers(&BeerFilter::new(page), false).await.unwrap();
    let scanned = repository.find(&BeerCriteria::All, page).await.unwrap();

    let listed_ids: Vec<_> = listed.content.iter().map(|dto| dto.id).collect();
    let scanned_ids: Vec<_> = scanned.iter().map(|beer| beer.id).collect();
    assert_eq!(listed_ids, scanned_ids);
    assert_eq!(listed.page_number, 1);
    assert_eq!(listed.page_size, 3);
}

#[tokio::test]
async fn list_by_name_returns_only_matching_names() {
    let (service, _) = seeded_service().await;
    let filter = BeerFilter::new(PageRequest::default()).with_name("Mango");

    let listed = service.list_beers(&filter, false).await.unwrap();

    assert_eq!(listed.content.len(), 3);
    assert!(listed.content.iter().all(|dto| dto.beer_name.contains("Mango")));
}

#[tokio::test]
async fn list_by_style_returns_only_that_style() {
    let (service, _) = seeded_service().await;
    let filter = BeerFilter::new(PageRequest::default()).with_style(BeerStyle::Ipa);

    let listed = service.list_beers(&filter, false).await.unwrap();

    assert_eq!(listed.content.len(), 2);
    assert!(listed.content.iter().all(|dto| dto.beer_style == "IPA"));
}

#[tokio::test]
async fn list_by_name_and_style_applies_both_predicates() {
    let (service, _) = seeded_service().await;
    let filter = BeerFilter::new(PageRequest::default())
        .with_name("Mango")
        .with_style(BeerStyle::Porter);

    let listed = service.list_beers(&filter, false).await.unwrap();

    let names: Vec<_> = listed.content.iter().map(|dto| dto.beer_name.as_str()).collect();
    assert_eq!(names, vec!["Mango Porter"]);
}

#[tokio::test]
async fn total_elements_counts_only_the_returned_page() {
    let (service, _) = seeded_service().await;
    let filter = BeerFilter::new(PageRequest::new(0, 2).unwrap());

    let listed = service.list_beers(&filter, false).await.unwrap();

    assert_eq!(listed.content.len(), 2);
    assert_eq!(listed.total_elements, 2);
}

#[tokio::test]
async fn list_hides_inventory_unless_requested() {
    let (service, _) = seeded_service().await;
    let filter = BeerFilter::new(PageRequest::default());

    let basic = service.list_beers(&filter, false).await.unwrap();
    let extended = service.list_beers(&filter, true).await.unwrap();

    assert!(basic.content.iter().all(|dto| dto.quantity_on_hand.is_none()));
    assert!(extended.content.iter().all(|dto| dto.quantity_on_hand == Some(10)));
}

#[tokio::test]
async fn repeated_listing_is_served_from_cache() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find()
        .times(1)
        .returning(|_, _| Ok(vec![stored_beer(1)]));
    let service = service_with_mock(repository);
    let filter = BeerFilter::new(PageRequest::default()).with_name("Mango");

    let first = service.list_beers(&filter, false).await.unwrap();
    let second = service.list_beers(&filter, false).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn listing_with_inventory_bypasses_cache() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find()
        .times(2)
        .returning(|_, _| Ok(vec![stored_beer(1)]));
    let service = service_with_mock(repository);
    let filter = BeerFilter::new(PageRequest::default());

    service.list_beers(&filter, true).await.unwrap();
    service.list_beers(&filter, true).await.unwrap();
}

#[tokio::test]
async fn get_by_id_is_cached_without_inventory() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find_by_id()
        .with(eq(1))
        .times(1)
        .returning(|id| Ok(Some(stored_beer(id))));
    let service = service_with_mock(repository);

    let first = service.get_by_id(1, false).await.unwrap();
    let second = service.get_by_id(1, false).await.unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_by_id_with_inventory_always_hits_storage() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find_by_id()
        .times(2)
        .returning(|id| Ok(Some(stored_beer(id))));
    let service = service_with_mock(repository);

    let first = service.get_by_id(1, true).await.unwrap().unwrap();
    service.get_by_id(1, true).await.unwrap();

    assert_eq!(first.quantity_on_hand, Some(122));
}

#[tokio::test]
async fn get_by_id_not_found_is_none_and_not_cached() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find_by_id()
        .times(2)
        .returning(|_| Ok(None));
    let service = service_with_mock(repository);

    assert!(service.get_by_id(404, false).await.unwrap().is_none());
    assert!(service.get_by_id(404, false).await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_upc_is_always_cached() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find_by_upc()
        .times(1)
        .returning(|_| Ok(Some(stored_beer(1))));
    let service = service_with_mock(repository);

    let first = service.get_by_upc("0631234200036").await.unwrap().unwrap();
    let second = service.get_by_upc("0631234200036").await.unwrap().unwrap();

    assert_eq!(first, second);
    assert!(first.quantity_on_hand.is_none());
}

#[tokio::test]
async fn update_of_unknown_id_writes_nothing() {
    let mut repository = MockBeerRepo::new();
    repository.expect_find_by_id().times(1).returning(|_| Ok(None));
    repository.expect_save().never();
    let service = service_with_mock(repository);

    let result = service
        .update_beer(999, BeerDto::new("Mango Bobs", "ALE", "0631234200036", 12.95))
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn update_overwrites_business_fields_and_keeps_identity() {
    let (service, repository) = seeded_service().await;
    let before = repository.find_by_id(1).await.unwrap().unwrap();

    let updated = service
        .update_beer(1, BeerDto::new("Mango Bobs Reserve", "STOUT", "1111111111111", 15.0))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, Some(1));
    assert_eq!(updated.beer_name, "Mango Bobs Reserve");
    assert_eq!(updated.beer_style, "STOUT");
    assert_eq!(updated.upc, "1111111111111");
    assert_eq!(updated.version, Some(before.version.unwrap() + 1));

    let stored = repository.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.quantity_on_hand, before.quantity_on_hand);
}

#[tokio::test]
async fn update_with_unknown_style_is_a_validation_error() {
    let (service, _) = seeded_service().await;

    let result = service
        .update_beer(1, BeerDto::new("Mango Bobs", "BARLEYWINE", "0631234200036", 12.95))
        .await;

    assert!(matches!(result, Err(CatalogError::Validation(_))));
}

#[tokio::test]
async fn delete_of_unknown_id_never_calls_delete() {
    let mut repository = MockBeerRepo::new();
    repository.expect_find_by_id().times(1).returning(|_| Ok(None));
    repository.expect_delete_by_id().never();
    let service = service_with_mock(repository);

    let outcome = service.delete_beer_by_id(999).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::NotFound);
}

#[tokio::test]
async fn delete_of_existing_id_deletes_once() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find_by_id()
        .times(1)
        .returning(|id| Ok(Some(stored_beer(id))));
    repository
        .expect_delete_by_id()
        .with(eq(5))
        .times(1)
        .returning(|_| Ok(()));
    let service = service_with_mock(repository);

    let outcome = service.delete_beer_by_id(5).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
}

#[tokio::test]
async fn storage_failure_propagates() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find_by_id()
        .times(1)
        .returning(|_| Err(CatalogError::DatabaseError(sqlx::Error::PoolTimedOut)));
    let service = service_with_mock(repository);

    let result = service.get_by_id(1, false).await;

    assert!(matches!(
        result,
        Err(CatalogError::DatabaseError(sqlx::Error::PoolTimedOut))
    ));
}

#[tokio::test]
async fn saved_beer_is_found_by_upc() {
    let (service, _) = seeded_service().await;

    let saved = service
        .save_new_beer(BeerDto::new("Pliny the Elder", "IPA", "8484957731775", 9.95))
        .await
        .unwrap();
    let found = service.get_by_upc("8484957731775").await.unwrap().unwrap();

    assert!(saved.id.is_some());
    assert_eq!(found.upc, saved.upc);
    assert_eq!(found.id, saved.id);
}

#[tokio::test]
async fn save_ignores_client_supplied_identity() {
    let (service, _) = seeded_service().await;
    let dto = BeerDto {
        id: Some(1),
        version: Some(9),
        ..BeerDto::new("Pliny the Elder", "IPA", "8484957731775", 9.95)
    };

    let saved = service.save_new_beer(dto).await.unwrap();

    assert_eq!(saved.id, Some(8));
    assert_eq!(saved.version, Some(0));
}

#[tokio::test]
async fn writes_do_not_invalidate_cached_reads() {
    let (service, _) = seeded_service().await;

    let cached = service.get_by_id(1, false).await.unwrap().unwrap();
    service
        .update_beer(1, BeerDto::new("Renamed", "ALE", "0631234200036", 12.95))
        .await
        .unwrap();

    let stale = service.get_by_id(1, false).await.unwrap().unwrap();
    let fresh = service.get_by_id(1, true).await.unwrap().unwrap();

    assert_eq!(stale.beer_name, cached.beer_name);
    assert_eq!(fresh.beer_name, "Renamed");
}

#[tokio::test]
async fn cache_failures_fall_back_to_storage() {
    let mut repository = MockBeerRepo::new();
    repository
        .expect_find_by_id()
        .times(2)
        .returning(|id| Ok(Some(stored_beer(id))));
    let service = BeerService::new(Arc::new(repository), CatalogCache::new(Arc::new(BrokenCache)));

    assert!(service.get_by_id(1, false).await.unwrap().is_some());
    assert!(service.get_by_id(1, false).await.unwrap().is_some());
}
