//! Async HTTP client for the beer endpoints of the catalog service.

pub mod client;
pub mod error;

pub use client::{BeerClient, ListBeersParams};
pub use error::{ClientError, Result};
