pub mod beer_service;
pub mod movie_service;

pub use beer_service::{BeerService, DeleteOutcome};
pub use movie_service::MovieService;
