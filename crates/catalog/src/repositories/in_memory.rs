//! Map-backed repositories for local runs and tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use domain::{Beer, Movie, PageRequest};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BeerRepository, MovieRepository};
use crate::criteria::BeerCriteria;
use crate::CatalogError;

#[derive(Debug, Default)]
struct BeerTable {
    rows: BTreeMap<i32, Beer>,
    last_id: i32,
}

/// In-memory BeerRepository with the same id, version and timestamp rules as
/// the Postgres one
#[derive(Debug, Default)]
pub struct InMemoryBeerRepository {
    table: RwLock<BeerTable>,
}

impl InMemoryBeerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

#[async_trait]
impl BeerRepository for InMemoryBeerRepository {
    async fn find(&self, criteria: &BeerCriteria, page: PageRequest) -> Result<Vec<Beer>, CatalogError> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .values()
            .filter(|beer| criteria.matches(beer))
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Beer>, CatalogError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_upc(&self, upc: &str) -> Result<Option<Beer>, CatalogError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|beer| beer.upc == upc).cloned())
    }

    async fn save(&self, mut beer: Beer) -> Result<Beer, CatalogError> {
        let now = Utc::now();
        let mut table = self.table.write().await;

        let id = match beer.id {
            Some(id) => id,
            None => {
                table.last_id += 1;
                table.last_id
            }
        };

        match table.rows.get(&id) {
            Some(existing) => {
                beer.version = Some(existing.version.unwrap_or(0) + 1);
                beer.created_date = existing.created_date;
            }
            None => {
                beer.version = Some(0);
                beer.created_date = Some(now);
                table.last_id = table.last_id.max(id);
            }
        }
        beer.id = Some(id);
        beer.last_modified_date = Some(now);

        table.rows.insert(id, beer.clone());
        Ok(beer)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), CatalogError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

/// In-memory MovieRepository
#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<HashMap<String, Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn save(&self, mut movie: Movie) -> Result<Movie, CatalogError> {
        let id = movie.id.take().unwrap_or_else(|| Uuid::new_v4().to_string());
        movie.id = Some(id.clone());

        self.movies.write().await.insert(id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, CatalogError> {
        Ok(self.movies.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Movie>, CatalogError> {
        let mut movies: Vec<Movie> = self.movies.read().await.values().cloned().collect();
        movies.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(movies)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), CatalogError> {
        self.movies.write().await.remove(id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), CatalogError> {
        self.movies.write().await.clear();
        Ok(())
    }
}
