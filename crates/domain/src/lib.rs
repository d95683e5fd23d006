pub mod dto;
pub mod entities;
pub mod errors;
pub mod events;
pub mod mappers;

pub use dto::{BeerDto, BeerPagedList, PageRequest};
pub use entities::{Beer, BeerStyle, Movie};
pub use errors::DomainError;
pub use events::MovieEvent;
