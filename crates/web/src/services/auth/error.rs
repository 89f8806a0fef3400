//! Authentication error types.

use coffee_wifi_core::EmailError;
use thiserror::Error;

use crate::db::RepositoryError;

/// Errors produced by the authentication service.
///
/// `UserNotFound` and `WrongPassword` are deliberately distinct: the login
/// view reports "user not recognized" and "wrong password" as separate flash
/// messages.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account matches the given email.
    #[error("user not recognized")]
    UserNotFound,

    /// The account exists but the password does not match.
    #[error("wrong password")]
    WrongPassword,

    /// The email is already registered.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// The display name is already taken by another account.
    #[error("that display name is already taken")]
    NameTaken,

    /// The email is not structurally valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password does not meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// Hashing the password failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// Underlying repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
