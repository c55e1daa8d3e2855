use sqlx::{postgres::PgArguments, PgPool};

use crate::database::models::CatalogProduct;
use crate::filter::{BindValue, FilterCriteria, PredicateRenderer};

/// Fixed join template for catalog reads. Inner joins make products with a
/// dangling category or brand reference invisible, which is the intended
/// visibility rule. The trailing `WHERE 1=1` is the identity predicate the
/// rendered conjunction is appended to.
const CATALOG_SELECT: &str = "SELECT p.id, p.category_id, p.brand_id, p.name, p.slug, \
     p.description, p.price, p.old_price, p.stock_quantity, p.image_url, \
     p.is_featured, p.created_at, p.updated_at, \
     c.name AS category_name, b.name AS brand_name \
     FROM products p \
     JOIN categories c ON p.category_id = c.id \
     JOIN brands b ON p.brand_id = b.id \
     WHERE 1=1";

/// Composes the predicate renderer's output with the catalog join template
/// and runs the query.
pub struct CatalogService;

impl CatalogService {
    /// Matching products joined with category and brand names, newest first.
    /// Ties on `created_at` break arbitrarily; no secondary sort key.
    pub async fn search(
        pool: &PgPool,
        criteria: &FilterCriteria,
    ) -> Result<Vec<CatalogProduct>, sqlx::Error> {
        let (query, params) = Self::build_query(criteria);

        let mut q = sqlx::query_as::<_, CatalogProduct>(&query);
        for param in &params {
            q = bind_param(q, param);
        }
        q.fetch_all(pool).await
    }

    /// Render the full parameterized statement. Pure; split out from
    /// `search` so the SQL shape is testable without a database.
    pub fn build_query(criteria: &FilterCriteria) -> (String, Vec<BindValue>) {
        let rendered = PredicateRenderer::generate(&criteria.predicates(), 0);

        let mut query = String::from(CATALOG_SELECT);
        let mut params = rendered.params;

        if !rendered.clause.is_empty() {
            query.push_str(" AND ");
            query.push_str(&rendered.clause);
        }

        query.push_str(&format!(
            " ORDER BY p.created_at DESC LIMIT ${} OFFSET ${}",
            params.len() + 1,
            params.len() + 2
        ));
        params.push(BindValue::Integer(criteria.limit));
        params.push(BindValue::Integer(criteria.offset));

        (query, params)
    }
}

fn bind_param<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    value: &'q BindValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments> {
    match value {
        BindValue::Text(s) => q.bind(s.as_str()),
        BindValue::Number(d) => q.bind(*d),
        BindValue::Integer(i) => q.bind(*i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use std::collections::HashMap;

    fn criteria_from(pairs: &[(&str, &str)]) -> FilterCriteria {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FilterCriteria::from_params(
            &params,
            &CatalogConfig { default_limit: 50, max_limit: 500 },
        )
        .unwrap()
    }

    #[test]
    fn bare_criteria_render_template_with_pagination_only() {
        let (query, params) = CatalogService::build_query(&criteria_from(&[]));
        assert!(query.starts_with("SELECT p.id"));
        assert!(query.contains("WHERE 1=1 ORDER BY p.created_at DESC LIMIT $1 OFFSET $2"));
        assert_eq!(params, vec![BindValue::Integer(50), BindValue::Integer(0)]);
    }

    #[test]
    fn all_filters_conjoin_in_fixed_order() {
        let (query, params) = CatalogService::build_query(&criteria_from(&[
            ("category", "phones"),
            ("brand", "acme"),
            ("minPrice", "10"),
            ("maxPrice", "20"),
            ("search", "pro"),
            ("featured", "1"),
            ("limit", "5"),
            ("offset", "10"),
        ]));

        assert!(query.contains(
            "WHERE 1=1 AND c.slug = $1 AND b.slug = $2 AND p.price >= $3 AND p.price <= $4 \
             AND (p.name ILIKE $5 OR p.description ILIKE $6 OR b.name ILIKE $7) \
             AND p.is_featured = TRUE ORDER BY p.created_at DESC LIMIT $8 OFFSET $9"
        ));
        assert_eq!(params.len(), 9);
        assert_eq!(params[0], BindValue::Text("phones".into()));
        assert_eq!(params[4], BindValue::Text("%pro%".into()));
        assert_eq!(params[7], BindValue::Integer(5));
        assert_eq!(params[8], BindValue::Integer(10));
    }

    #[test]
    fn search_term_is_bound_not_spliced() {
        let (query, params) =
            CatalogService::build_query(&criteria_from(&[("search", "'; DROP TABLE products--")]));
        assert!(!query.contains("DROP TABLE"));
        assert!(params.contains(&BindValue::Text("%'; DROP TABLE products--%".into())));
    }
}
