use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use common::metrics;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    match metrics::gather_metrics() {
        Ok(metrics) => (StatusCode::OK, metrics),
        Err(e) => {
            tracing::error!("Failed to gather metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, String::from("Failed to gather metrics"))
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(metrics_handler))

        // Beers
        .route(
            "/api/v1/beer",
            get(handlers::beers::list_beers).post(handlers::beers::create_beer),
        )
        .route(
            "/api/v1/beer/:beer_id",
            get(handlers::beers::get_beer_by_id)
                .put(handlers::beers::update_beer)
                .delete(handlers::beers::delete_beer),
        )
        .route("/api/v1/beerUpc/:upc", get(handlers::beers::get_beer_by_upc))

        // Movies
        .route(
            "/movies",
            get(handlers::movies::find_all).post(handlers::movies::save),
        )
        .route(
            "/movies/:id",
            get(handlers::movies::find_by_id).delete(handlers::movies::delete),
        )
        .route("/movies/:id/events", get(handlers::movies::stream_events))

        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
