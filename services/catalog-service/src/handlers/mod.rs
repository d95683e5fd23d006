pub mod beers;
pub mod health;
pub mod movies;

use axum::{http::StatusCode, Json};
use catalog::CatalogError;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a catalog failure onto a response. Invalid input is the caller's
/// fault; everything else is ours.
pub fn catalog_error(operation: &str, e: CatalogError) -> ApiError {
    match e {
        CatalogError::Validation(e) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        e => {
            error!("Failed to {}: {}", operation, e);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {}: {}", operation, e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, body) = catalog_error(
            "update beer",
            CatalogError::Validation(DomainError::UnknownBeerStyle("BARLEYWINE".to_string())),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("BARLEYWINE"));
    }

    #[test]
    fn test_storage_failure_maps_to_internal_error() {
        let (status, _) = catalog_error(
            "list beers",
            CatalogError::DatabaseError(sqlx::Error::PoolTimedOut),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
