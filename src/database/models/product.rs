use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row as stored, without joined names. Returned by admin CRUD.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub brand_id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub image_url: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product joined with its category and brand names, as returned by the
/// catalog endpoint. Products with dangling category or brand references are
/// invisible here (inner-join semantics).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogProduct {
    pub id: i32,
    pub category_id: i32,
    pub brand_id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub image_url: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: String,
    pub brand_name: String,
}
