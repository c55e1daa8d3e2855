use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::{PublicUser, Session};

/// Raw entropy per session token, before base64 encoding.
const TOKEN_BYTES: usize = 32;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Hash a plaintext password with Argon2id and a per-password random salt.
/// The digest is stored in PHC string format, algorithm parameters included.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored digest. An unparseable
/// digest counts as a mismatch; callers must not learn why verification
/// failed.
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Produce a fixed-length, URL-safe opaque token from a CSPRNG. No
/// uniqueness check against prior tokens; probabilistically unique by
/// construction.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Issue a token for the user and persist the token-to-user binding with an
/// expiry. Every successful login or registration goes through here.
pub async fn create_session(
    pool: &PgPool,
    user_id: i32,
    ttl_hours: i64,
) -> Result<Session, sqlx::Error> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);

    sqlx::query_as::<_, Session>(
        "INSERT INTO sessions (token, user_id, expires_at) \
         VALUES ($1, $2, $3) \
         RETURNING token, user_id, created_at, expires_at",
    )
    .bind(&token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Resolve a presented token to its user. Unknown and expired tokens both
/// yield `None`.
pub async fn session_user(pool: &PgPool, token: &str) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        "SELECT u.id, u.email, u.full_name, u.role \
         FROM sessions s \
         JOIN users u ON s.user_id = u.id \
         WHERE s.token = $1 AND s.expires_at > NOW()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_roundtrip_verifies() {
        let digest = hash_password("s3cret").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &digest));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let digest = hash_password("s3cret").unwrap();
        assert!(!verify_password("wrong", &digest));
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let a = hash_password("s3cret").unwrap();
        let b = hash_password("s3cret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_digest_counts_as_mismatch() {
        assert!(!verify_password("s3cret", "not-a-phc-string"));
    }

    #[test]
    fn tokens_are_fixed_length_and_url_safe() {
        let token = generate_token();
        // 32 bytes -> 43 chars of unpadded base64url
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(token, generate_token());
    }
}
