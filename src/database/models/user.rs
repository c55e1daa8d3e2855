use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row, including the password digest. Never serialized into
/// responses; handlers return `PublicUser` instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
    pub role: String,
}

/// The caller-facing projection of a user. Excludes the password digest.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }
    }
}
