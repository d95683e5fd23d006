//! Composition of listing predicates from optional filter fields.

use domain::{Beer, BeerStyle, PageRequest};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

/// Optional name/style predicates plus the requested page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeerFilter {
    pub beer_name: Option<String>,
    pub beer_style: Option<BeerStyle>,
    pub page: PageRequest,
}

impl BeerFilter {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, beer_name: impl Into<String>) -> Self {
        self.beer_name = Some(beer_name.into());
        self
    }

    pub fn with_style(mut self, beer_style: BeerStyle) -> Self {
        self.beer_style = Some(beer_style);
        self
    }

    /// Name predicate, with an empty string counting as absent
    fn name(&self) -> Option<&str> {
        self.beer_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn criteria(&self) -> BeerCriteria {
        match (self.name(), self.beer_style) {
            (Some(name), Some(style)) => BeerCriteria::NameLikeAndStyle(name.to_string(), style),
            (Some(name), None) => BeerCriteria::NameLike(name.to_string()),
            (None, Some(style)) => BeerCriteria::StyleIs(style),
            (None, None) => BeerCriteria::All,
        }
    }

    /// Key for the listing cache. Filters that compose to the same predicate
    /// and page share a key.
    pub fn cache_key(&self) -> String {
        format!(
            "{:?}|{:?}|{}|{}",
            self.name(),
            self.beer_style.map(|style| style.as_str()),
            self.page.page_number,
            self.page.page_size
        )
    }
}

/// Predicate applied to a beer listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeerCriteria {
    All,
    NameLike(String),
    StyleIs(BeerStyle),
    NameLikeAndStyle(String, BeerStyle),
}

impl BeerCriteria {
    /// Evaluate against a record in memory. Name matching is case-sensitive,
    /// like `LIKE` in Postgres.
    pub fn matches(&self, beer: &Beer) -> bool {
        match self {
            BeerCriteria::All => true,
            BeerCriteria::NameLike(name) => beer.beer_name.contains(name.as_str()),
            BeerCriteria::StyleIs(style) => beer.beer_style == *style,
            BeerCriteria::NameLikeAndStyle(name, style) => {
                beer.beer_name.contains(name.as_str()) && beer.beer_style == *style
            }
        }
    }

    /// Append the matching `WHERE` clause, if any
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            BeerCriteria::All => {}
            BeerCriteria::NameLike(name) => {
                builder
                    .push(" WHERE beer_name LIKE ")
                    .push_bind(like_pattern(name))
                    .push(r" ESCAPE '\'");
            }
            BeerCriteria::StyleIs(style) => {
                builder.push(" WHERE beer_style = ").push_bind(style.as_str());
            }
            BeerCriteria::NameLikeAndStyle(name, style) => {
                builder
                    .push(" WHERE beer_name LIKE ")
                    .push_bind(like_pattern(name))
                    .push(r" ESCAPE '\'")
                    .push(" AND beer_style = ")
                    .push_bind(style.as_str());
            }
        }
    }
}

/// Substring pattern with `%`, `_` and the escape character taken literally
fn like_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 2);
    pattern.push('%');
    for c in name.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
