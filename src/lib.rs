pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared per-process state handed to every handler. The pool is the only
/// shared resource; handlers themselves are stateless.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}
