use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::FilterError;
use super::types::Predicate;
use crate::config::CatalogConfig;

/// Columns referenced by catalog predicates. These are fixed identifiers in
/// the catalog join template, not user input.
const CATEGORY_SLUG: &str = "c.slug";
const BRAND_SLUG: &str = "b.slug";
const PRICE: &str = "p.price";
const FEATURED: &str = "p.is_featured";
const SEARCH_COLUMNS: &[&str] = &["p.name", "p.description", "b.name"];

/// Parsed catalog query parameters. Constructed fresh per request from the
/// string-typed query map; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub featured: bool,
    pub limit: i64,
    pub offset: i64,
}

impl FilterCriteria {
    /// Parse raw query parameters. Empty-string values are treated as absent,
    /// matching the permissive behavior of typical storefront clients that
    /// send `?category=&brand=`.
    pub fn from_params(
        params: &HashMap<String, String>,
        catalog: &CatalogConfig,
    ) -> Result<Self, FilterError> {
        let get = |key: &str| params.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let min_price = get("minPrice").map(|v| parse_price("minPrice", v)).transpose()?;
        let max_price = get("maxPrice").map(|v| parse_price("maxPrice", v)).transpose()?;

        let limit = match get("limit") {
            Some(v) => parse_non_negative("limit", v)?,
            None => catalog.default_limit,
        };
        let offset = match get("offset") {
            Some(v) => parse_non_negative("offset", v)?,
            None => 0,
        };

        // Cap page size rather than erroring; oversized limits are a client
        // tuning mistake, not a protocol violation.
        let limit = if limit > catalog.max_limit {
            tracing::warn!(limit, max = catalog.max_limit, "capping catalog limit");
            catalog.max_limit
        } else {
            limit
        };

        Ok(Self {
            category: get("category").map(str::to_string),
            brand: get("brand").map(str::to_string),
            min_price,
            max_price,
            search: get("search").map(str::to_string),
            featured: get("featured").is_some(),
            limit,
            offset,
        })
    }

    /// Accumulate predicates in fixed order: category, brand, minPrice,
    /// maxPrice, search, featured. All predicates are conjoined, so the order
    /// only matters for positional bind alignment.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![];

        if let Some(slug) = &self.category {
            predicates.push(Predicate::EqualsSlug { column: CATEGORY_SLUG, slug: slug.clone() });
        }
        if let Some(slug) = &self.brand {
            predicates.push(Predicate::EqualsSlug { column: BRAND_SLUG, slug: slug.clone() });
        }
        if let Some(bound) = self.min_price {
            predicates.push(Predicate::RangeGte { column: PRICE, bound });
        }
        if let Some(bound) = self.max_price {
            predicates.push(Predicate::RangeLte { column: PRICE, bound });
        }
        if let Some(term) = &self.search {
            predicates.push(Predicate::SubstringAnyOf { columns: SEARCH_COLUMNS, term: term.clone() });
        }
        if self.featured {
            predicates.push(Predicate::Flag { column: FEATURED });
        }

        predicates
    }
}

fn parse_price(field: &'static str, value: &str) -> Result<Decimal, FilterError> {
    let parsed = Decimal::from_str(value).map_err(|_| FilterError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;
    if parsed.is_sign_negative() {
        return Err(FilterError::NegativeValue { field });
    }
    Ok(parsed)
}

fn parse_non_negative(field: &'static str, value: &str) -> Result<i64, FilterError> {
    let parsed: i64 = value.parse().map_err(|_| FilterError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;
    if parsed < 0 {
        return Err(FilterError::NegativeValue { field });
    }
    Ok(parsed)
}
