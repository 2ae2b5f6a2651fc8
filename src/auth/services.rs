use sqlx::PgPool;
use tracing::{info, warn};

use super::dto::{LoginAttempt, RegisterForm};
use super::error::AuthError;
use super::password::{hash_password, verify_password};
use super::repo_types::{Profile, User};

/// Registers a new user: confirmation check, then hash, then insert. The
/// store is never touched when validation fails, and only ever sees the
/// hash. The email is free-form; a duplicate user name surfaces from the
/// store's uniqueness constraint as `DuplicateUser`.
pub async fn register(db: &PgPool, form: RegisterForm) -> Result<(), AuthError> {
    if form.password != form.password2 {
        warn!(user_name = %form.user_name, "registration password mismatch");
        return Err(AuthError::Validation);
    }

    let hash = hash_password(&form.password)?;
    let user = User::create(db, &form.user_name, form.email.trim(), &hash).await?;

    info!(user_id = %user.id, user_name = %user.user_name, "user registered");
    Ok(())
}

/// Validates credentials and, on success, records the login in the user's
/// capped history before returning the sanitized profile. The returned
/// profile reflects the updated history, newest entry first.
pub async fn authenticate(db: &PgPool, attempt: LoginAttempt) -> Result<Profile, AuthError> {
    let Some(mut user) = User::find_by_user_name(db, &attempt.user_name).await? else {
        warn!(user_name = %attempt.user_name, "login unknown user");
        return Err(AuthError::UserNotFound(attempt.user_name));
    };

    if !verify_password(&attempt.password, &user.password_hash)? {
        warn!(user_name = %user.user_name, "login invalid password");
        return Err(AuthError::InvalidCredentials(attempt.user_name));
    }

    user.login_history.record(&attempt.user_agent);
    User::update_login_history(db, &user.user_name, &user.login_history).await?;

    info!(user_id = %user.id, user_name = %user.user_name, "user logged in");
    Ok(Profile::from(user))
}
