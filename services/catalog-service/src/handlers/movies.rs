use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use domain::Movie;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use super::{api_error, catalog_error, ApiError};
use crate::state::AppState;

pub async fn save(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let saved = state
        .movies
        .save(movie)
        .await
        .map_err(|e| catalog_error("save movie", e))?;

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state
        .movies
        .find_all()
        .await
        .map_err(|e| catalog_error("list movies", e))?;

    Ok(Json(movies))
}

pub async fn find_by_id(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    match state.movies.find_by_id(&movie_id).await {
        Ok(Some(movie)) => Ok(Json(movie)),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Movie not found: {}", movie_id),
        )),
        Err(e) => Err(catalog_error("fetch movie", e)),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .movies
        .delete(&movie_id)
        .await
        .map_err(|e| catalog_error("delete movie", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// SSE feed of status ticks for one movie. Runs until the client disconnects,
/// which drops the stream and its timer.
pub async fn stream_events(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!("Client subscribed to events for movie: {}", movie_id);

    let stream = state
        .movies
        .stream_movie_events(&movie_id)
        .map(|event| Event::default().json_data(event));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
