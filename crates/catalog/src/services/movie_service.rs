use std::sync::Arc;
use std::time::Duration;

use domain::{Movie, MovieEvent};
use tokio_stream::Stream;
use tracing::info;

use crate::repositories::MovieRepository;
use crate::streams::movie_event_stream;
use crate::CatalogError;

/// Movie catalog operations and per-movie event streams
#[derive(Clone)]
pub struct MovieService {
    repository: Arc<dyn MovieRepository>,
    event_cadence: Duration,
}

impl MovieService {
    pub fn new(repository: Arc<dyn MovieRepository>, event_cadence: Duration) -> Self {
        Self {
            repository,
            event_cadence,
        }
    }

    /// Store a new movie under a freshly assigned id
    pub async fn save(&self, mut movie: Movie) -> Result<Movie, CatalogError> {
        movie.id = None;
        let saved = self.repository.save(movie).await?;
        info!("Saved movie: {:?}", saved.id);
        Ok(saved)
    }

    pub async fn find_by_id(&self, movie_id: &str) -> Result<Option<Movie>, CatalogError> {
        self.repository.find_by_id(movie_id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Movie>, CatalogError> {
        self.repository.find_all().await
    }

    pub async fn delete(&self, movie_id: &str) -> Result<(), CatalogError> {
        self.repository.delete_by_id(movie_id).await?;
        info!("Deleted movie: {}", movie_id);
        Ok(())
    }

    /// Endless events for `movie_id`, one per cadence tick. The movie does
    /// not have to exist.
    pub fn stream_movie_events(&self, movie_id: &str) -> impl Stream<Item = MovieEvent> + Send + 'static {
        movie_event_stream(movie_id.to_string(), self.event_cadence)
    }
}
