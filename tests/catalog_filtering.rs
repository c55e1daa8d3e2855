// These tests exercise the catalog filter surface end to end at the SQL
// level: query-parameter parsing, predicate accumulation and rendering, and
// the final statement composed by the catalog service. No database required.

use std::collections::HashMap;

use anyhow::Result;

use storefront_api::config::CatalogConfig;
use storefront_api::filter::{BindValue, FilterCriteria};
use storefront_api::services::CatalogService;

fn parse(pairs: &[(&str, &str)]) -> Result<FilterCriteria> {
    let params: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let criteria = FilterCriteria::from_params(
        &params,
        &CatalogConfig { default_limit: 50, max_limit: 500 },
    )?;
    Ok(criteria)
}

#[test]
fn unfiltered_request_pages_the_whole_catalog_newest_first() -> Result<()> {
    let (query, params) = CatalogService::build_query(&parse(&[])?);

    assert!(query.contains("JOIN categories c ON p.category_id = c.id"));
    assert!(query.contains("JOIN brands b ON p.brand_id = b.id"));
    assert!(query.ends_with("ORDER BY p.created_at DESC LIMIT $1 OFFSET $2"));
    assert_eq!(params, vec![BindValue::Integer(50), BindValue::Integer(0)]);
    Ok(())
}

#[test]
fn price_window_renders_both_bounds_in_order() -> Result<()> {
    let (query, params) =
        CatalogService::build_query(&parse(&[("minPrice", "10.00"), ("maxPrice", "19.99")])?);

    assert!(query.contains("p.price >= $1 AND p.price <= $2"));
    assert!(matches!(params[0], BindValue::Number(_)));
    assert!(matches!(params[1], BindValue::Number(_)));
    Ok(())
}

#[test]
fn search_spans_name_description_and_brand_name() -> Result<()> {
    let (query, params) = CatalogService::build_query(&parse(&[("search", "camera")])?);

    assert!(query.contains("(p.name ILIKE $1 OR p.description ILIKE $2 OR b.name ILIKE $3)"));
    assert_eq!(
        params[..3],
        [
            BindValue::Text("%camera%".into()),
            BindValue::Text("%camera%".into()),
            BindValue::Text("%camera%".into()),
        ]
    );
    Ok(())
}

#[test]
fn offset_paginates_past_the_first_page() -> Result<()> {
    let (_, params) = CatalogService::build_query(&parse(&[("limit", "20"), ("offset", "40")])?);
    assert_eq!(
        params[params.len() - 2..],
        [BindValue::Integer(20), BindValue::Integer(40)]
    );
    Ok(())
}

#[test]
fn malformed_numeric_input_is_rejected_up_front() {
    assert!(parse(&[("minPrice", "ten")]).is_err());
    assert!(parse(&[("limit", "many")]).is_err());
}
