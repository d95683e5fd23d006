pub mod bootstrap;
pub mod cache;
pub mod criteria;
pub mod repositories;
pub mod services;
pub mod streams;

pub use cache::{CacheName, CacheStore, CatalogCache, InMemoryCache, RedisCache};
pub use criteria::{BeerCriteria, BeerFilter};
pub use repositories::{
    BeerRepository, InMemoryBeerRepository, InMemoryMovieRepository, MovieRepository,
    PostgresBeerRepository, PostgresMovieRepository,
};
pub use services::{BeerService, DeleteOutcome, MovieService};
pub use streams::movie_event_stream;

use domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Corrupt record {id}: {reason}")]
    CorruptRecord { id: String, reason: String },
}
