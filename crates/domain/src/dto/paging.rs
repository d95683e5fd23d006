use serde::{Deserialize, Serialize};

use crate::dto::BeerDto;
use crate::errors::DomainError;

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::InvalidPageRequest(
                "Page size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// Row offset of the first element on this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of beers.
///
/// `total_elements` is the number of beers on this page, not a count of every
/// matching row in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerPagedList {
    pub content: Vec<BeerDto>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
}

impl BeerPagedList {
    pub fn new(content: Vec<BeerDto>, page: PageRequest) -> Self {
        let total_elements = content.len() as u64;
        Self {
            content,
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.page_size))
    }
}
