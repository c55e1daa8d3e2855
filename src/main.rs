use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use storefront_api::{config::AppConfig, database, handlers, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_api=info,tower_http=info".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Starting storefront API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to run migrations: {}", e));

    let port = config.port;
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("storefront API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Catalog
        .route("/products", get(handlers::catalog::products_get))
        // Auth
        .route("/auth", post(handlers::auth::auth_post))
        .route("/auth/me", get(handlers::auth::me_get))
        // Admin
        .route("/admin/catalog", get(handlers::admin::catalog_get))
        .route("/admin/products", post(handlers::admin::product_post))
        .route("/admin/products/:id", put(handlers::admin::product_put))
        // Contact
        .route("/contact", post(handlers::contact::contact_post))
        // Global middleware; the CORS layer also answers preflight requests
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Storefront API",
        "version": version,
        "endpoints": {
            "catalog": "GET /products?category&brand&minPrice&maxPrice&search&featured&limit&offset",
            "auth": "POST /auth (register with full_name, login without), GET /auth/me",
            "admin": "GET /admin/catalog, POST /admin/products, PUT /admin/products/:id",
            "contact": "POST /contact",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
