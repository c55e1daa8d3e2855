use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::filter::FilterCriteria;
use crate::services::CatalogService;
use crate::AppState;

/// GET /products - list products with optional filters
///
/// Query parameters: `category`, `brand`, `minPrice`, `maxPrice`, `search`,
/// `featured`, `limit`, `offset`. Response `count` is the size of this page,
/// not the total number of matches.
pub async fn products_get(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let criteria = FilterCriteria::from_params(&params, &state.config.catalog)?;
    let products = CatalogService::search(&state.pool, &criteria).await?;
    let count = products.len();

    Ok(Json(json!({
        "products": products,
        "count": count,
    })))
}
