use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use catalog::bootstrap::{seed_beers, seed_movies};
use catalog::{
    BeerRepository, BeerService, CacheStore, CatalogCache, InMemoryBeerRepository, InMemoryCache,
    InMemoryMovieRepository, MovieRepository, MovieService, PostgresBeerRepository,
    PostgresMovieRepository, RedisCache,
};
use common::{AppConfig, CacheBackend, StorageBackend};
use sqlx::postgres::PgPoolOptions;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub beers: BeerService,
    pub movies: MovieService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let (beer_repository, movie_repository) = connect_storage(config).await?;
        let cache_store = connect_cache(config).await?;

        if config.seed_data {
            seed_beers(beer_repository.as_ref()).await?;
            seed_movies(movie_repository.as_ref()).await?;
        }

        Ok(Self::from_parts(
            beer_repository,
            movie_repository,
            cache_store,
            config.event_cadence(),
        ))
    }

    pub fn from_parts(
        beer_repository: Arc<dyn BeerRepository>,
        movie_repository: Arc<dyn MovieRepository>,
        cache_store: Arc<dyn CacheStore>,
        event_cadence: Duration,
    ) -> Self {
        Self {
            beers: BeerService::new(beer_repository, CatalogCache::new(cache_store)),
            movies: MovieService::new(movie_repository, event_cadence),
        }
    }
}

async fn connect_storage(
    config: &AppConfig,
) -> Result<(Arc<dyn BeerRepository>, Arc<dyn MovieRepository>)> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok((
                Arc::new(InMemoryBeerRepository::new()),
                Arc::new(InMemoryMovieRepository::new()),
            ))
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url())
                .await?;
            tracing::info!("Database connected");

            let beers = PostgresBeerRepository::new(pool.clone());
            beers.ensure_schema().await?;
            let movies = PostgresMovieRepository::new(pool);
            movies.ensure_schema().await?;

            Ok((Arc::new(beers), Arc::new(movies)))
        }
    }
}

async fn connect_cache(config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
    match config.cache.backend {
        CacheBackend::Memory => {
            tracing::info!("Using in-memory cache");
            Ok(Arc::new(InMemoryCache::with_capacity(
                config.cache.ttl(),
                config.cache.max_entries,
            )))
        }
        CacheBackend::Redis => {
            tracing::info!("Connecting to Redis...");
            let cache = RedisCache::new(&config.cache.redis_url, config.cache.ttl_seconds).await?;
            cache.ping().await?;
            tracing::info!("Redis connected");
            Ok(Arc::new(cache))
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state(event_cadence: Duration) -> (AppState, Arc<InMemoryBeerRepository>) {
    let beers = Arc::new(InMemoryBeerRepository::new());
    let state = AppState::from_parts(
        beers.clone(),
        Arc::new(InMemoryMovieRepository::new()),
        Arc::new(InMemoryCache::new(Duration::from_secs(300))),
        event_cadence,
    );
    (state, beers)
}
