pub mod admin;
pub mod auth;
pub mod catalog;
pub mod contact;

use axum::http::HeaderMap;

use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::AppState;

/// Header carrying the opaque bearer token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Resolve the presented token to a user, rejecting missing, unknown and
/// expired tokens alike with a 401.
pub(crate) async fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<PublicUser, ApiError> {
    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    crate::auth::session_user(&state.pool, token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))
}
