pub mod beer_repository;
pub mod in_memory;
pub mod movie_repository;

pub use beer_repository::PostgresBeerRepository;
pub use in_memory::{InMemoryBeerRepository, InMemoryMovieRepository};
pub use movie_repository::PostgresMovieRepository;

use async_trait::async_trait;
use domain::{Beer, Movie, PageRequest};

use crate::criteria::BeerCriteria;
use crate::CatalogError;

/// Storage for beers
#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// One page of beers matching `criteria`, ordered by id
    async fn find(&self, criteria: &BeerCriteria, page: PageRequest) -> Result<Vec<Beer>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Beer>, CatalogError>;

    async fn find_by_upc(&self, upc: &str) -> Result<Option<Beer>, CatalogError>;

    /// Insert when `id` is `None`, otherwise update in place. Storage assigns
    /// the id on insert and advances version and timestamps on every write.
    async fn save(&self, beer: Beer) -> Result<Beer, CatalogError>;

    async fn delete_by_id(&self, id: i32) -> Result<(), CatalogError>;
}

/// Storage for movies
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Insert when `id` is `None`, otherwise overwrite
    async fn save(&self, movie: Movie) -> Result<Movie, CatalogError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, CatalogError>;

    async fn find_all(&self) -> Result<Vec<Movie>, CatalogError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), CatalogError>;

    async fn delete_all(&self) -> Result<(), CatalogError>;
}
