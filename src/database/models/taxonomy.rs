use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog grouping referenced by products. Read-only outside of seeding.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub slug: String,
}
