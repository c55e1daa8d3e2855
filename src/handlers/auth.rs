use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{create_session, hash_password, verify_password};
use crate::database::models::{PublicUser, User};
use crate::error::ApiError;
use crate::AppState;

/// Body for POST /auth. A present `full_name` selects registration,
/// otherwise the request is a login attempt.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// POST /auth - register (with `full_name`) or log in
pub async fn auth_post(
    State(state): State<AppState>,
    Json(body): Json<AuthRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let email = non_empty(&body.email);
    let password = non_empty(&body.password);

    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::validation_error("Email and password are required", None));
    };

    match non_empty(&body.full_name) {
        Some(full_name) => {
            let phone = non_empty(&body.phone).unwrap_or_default();
            let user = register(&state, email, password, full_name, phone).await?;
            let session =
                create_session(&state.pool, user.id, state.config.auth.session_ttl_hours).await?;
            Ok((
                StatusCode::CREATED,
                Json(json!({ "token": session.token, "user": user })),
            ))
        }
        None => {
            let user = login(&state, email, password).await?;
            let session =
                create_session(&state.pool, user.id, state.config.auth.session_ttl_hours).await?;
            Ok((
                StatusCode::OK,
                Json(json!({ "token": session.token, "user": user })),
            ))
        }
    }
}

/// GET /auth/me - current user for the presented token
pub async fn me_get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user = super::require_session(&state, &headers).await?;
    Ok(Json(json!({ "user": user })))
}

async fn register(
    state: &AppState,
    email: &str,
    password: &str,
    full_name: &str,
    phone: &str,
) -> Result<PublicUser, ApiError> {
    let password_hash = hash_password(password)?;

    let result = sqlx::query_as::<_, PublicUser>(
        "INSERT INTO users (email, password_hash, full_name, phone, role) \
         VALUES ($1, $2, $3, $4, 'user') \
         RETURNING id, email, full_name, role",
    )
    .bind(email)
    .bind(&password_hash)
    .bind(full_name)
    .bind(phone)
    .fetch_one(&state.pool)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(ApiError::conflict("User with this email already exists"))
        }
        Err(other) => Err(other.into()),
    }
}

async fn login(state: &AppState, email: &str, password: &str) -> Result<PublicUser, ApiError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, full_name, phone, role \
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(&state.pool)
    .await?;

    // Unknown email and wrong password collapse into the same failure.
    match user {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user.into()),
        _ => Err(ApiError::unauthorized("Invalid credentials")),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
