pub mod beer;
pub mod movie;

pub use beer::{Beer, BeerStyle};
pub use movie::Movie;
