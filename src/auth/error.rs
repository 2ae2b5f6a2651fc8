use thiserror::Error;

/// Authentication failure taxonomy. The `Display` strings are what the
/// login/register forms re-render, so they stay human-readable and mirror
/// the messages users of the original site saw.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Passwords do not match")]
    Validation,

    #[error("User Name already taken")]
    DuplicateUser,

    #[error("Unable to find user: {0}")]
    UserNotFound(String),

    #[error("Incorrect Password for user: {0}")]
    InvalidCredentials(String),

    #[error("There was an error encrypting the password")]
    Hashing,

    #[error("There was an error creating the user: {0}")]
    Store(#[from] sqlx::Error),
}
