use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Brand, Category, Product};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub old_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
}

/// POST /admin/products - create a product
pub async fn product_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    super::require_session(&state, &headers).await?;
    validate_create(&body)?;

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products \
         (category_id, brand_id, name, slug, description, price, old_price, \
          stock_quantity, image_url, is_featured) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING *",
    )
    .bind(body.category_id)
    .bind(body.brand_id)
    .bind(&body.name)
    .bind(&body.slug)
    .bind(body.description.as_deref().unwrap_or(""))
    .bind(body.price)
    .bind(body.old_price)
    .bind(body.stock_quantity.unwrap_or(0))
    .bind(body.image_url.as_deref().unwrap_or(""))
    .bind(body.is_featured.unwrap_or(false))
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "product": product }))))
}

/// PUT /admin/products/:id - partial update; absent fields keep their
/// stored values
pub async fn product_put(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    headers: HeaderMap,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<Value>, ApiError> {
    super::require_session(&state, &headers).await?;

    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET \
         name = COALESCE($1, name), \
         description = COALESCE($2, description), \
         price = COALESCE($3, price), \
         old_price = COALESCE($4, old_price), \
         stock_quantity = COALESCE($5, stock_quantity), \
         image_url = COALESCE($6, image_url), \
         is_featured = COALESCE($7, is_featured), \
         updated_at = NOW() \
         WHERE id = $8 \
         RETURNING *",
    )
    .bind(&body.name)
    .bind(&body.description)
    .bind(body.price)
    .bind(body.old_price)
    .bind(body.stock_quantity)
    .bind(&body.image_url)
    .bind(body.is_featured)
    .bind(product_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(json!({ "product": product })))
}

/// GET /admin/catalog - all categories and brands, for admin form dropdowns
pub async fn catalog_get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    super::require_session(&state, &headers).await?;

    let categories =
        sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories ORDER BY name")
            .fetch_all(&state.pool)
            .await?;
    let brands = sqlx::query_as::<_, Brand>("SELECT id, name, slug FROM brands ORDER BY name")
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(json!({ "categories": categories, "brands": brands })))
}

fn validate_create(body: &CreateProductRequest) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if body.category_id.is_none() {
        field_errors.insert("category_id".to_string(), "This field is required".to_string());
    }
    if body.brand_id.is_none() {
        field_errors.insert("brand_id".to_string(), "This field is required".to_string());
    }
    if body.name.as_deref().map_or(true, str::is_empty) {
        field_errors.insert("name".to_string(), "This field is required".to_string());
    }
    if body.slug.as_deref().map_or(true, str::is_empty) {
        field_errors.insert("slug".to_string(), "This field is required".to_string());
    }
    if body.price.is_none() {
        field_errors.insert("price".to_string(), "This field is required".to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Missing required fields", Some(field_errors)))
    }
}
