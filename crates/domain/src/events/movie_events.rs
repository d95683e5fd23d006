use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status tick for a single movie. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEvent {
    pub movie_id: String,
    pub date: DateTime<Utc>,
}

impl MovieEvent {
    pub fn new(movie_id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            movie_id: movie_id.into(),
            date,
        }
    }

    /// Event stamped with the current time
    pub fn now(movie_id: impl Into<String>) -> Self {
        Self::new(movie_id, Utc::now())
    }
}
