use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown beer style: {0}")]
    UnknownBeerStyle(String),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),
}
