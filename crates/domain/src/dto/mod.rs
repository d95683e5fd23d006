pub mod beer_dto;
pub mod paging;

pub use beer_dto::BeerDto;
pub use paging::{BeerPagedList, PageRequest};
