use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::history::LoginHistory;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub user_name: String, // globally unique
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, never exposed in JSON
    pub login_history: Json<LoginHistory>,
    pub created_at: OffsetDateTime,
}

/// The sanitized view handed to callers after a successful authentication.
/// Deliberately has no password field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_name: String,
    pub email: String,
    pub login_history: LoginHistory,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            user_name: user.user_name,
            email: user.email,
            login_history: user.login_history.0,
        }
    }
}
