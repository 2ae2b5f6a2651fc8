use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::AuthError;
use super::history::LoginHistory;
use super::repo_types::User;

impl User {
    /// Find a user by their unique user name.
    pub async fn find_by_user_name(db: &PgPool, user_name: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, email, password_hash, login_history, created_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user. Uniqueness of `user_name` is enforced only by the
    /// store constraint; a concurrent registration race is settled by the
    /// second writer landing here with a unique violation.
    pub async fn create(
        db: &PgPool,
        user_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, user_name, email, password_hash, login_history)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_name, email, password_hash, login_history, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_name)
        .bind(email)
        .bind(password_hash)
        .bind(Json(LoginHistory::new()))
        .fetch_one(db)
        .await
        .map_err(map_create_error)?;
        Ok(user)
    }

    /// Persist a mutated login history for an existing user.
    pub async fn update_login_history(
        db: &PgPool,
        user_name: &str,
        history: &LoginHistory,
    ) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            UPDATE users
            SET login_history = $2
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .bind(Json(history))
        .execute(db)
        .await?;
        Ok(())
    }
}

/// Maps an insert failure to the taxonomy: the store constraint tripping
/// on `user_name` means the name is taken; anything else passes through.
fn map_create_error(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AuthError::DuplicateUser;
        }
    }
    AuthError::Store(e)
}
