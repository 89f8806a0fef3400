//! Authentication service.
//!
//! Password registration and login over the user repository. Passwords are
//! hashed with argon2id before storage; plaintext is never persisted or
//! logged.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use coffee_wifi_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles user registration and email/password login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with display name, email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is already
    /// registered, or `AuthError::NameTaken` if the display name is.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        // Validate email
        let email = Email::parse(email)?;

        // Validate password
        validate_password(password)?;

        // Hash password
        let password_hash = hash_password(password)?;

        // Create user
        let user = self
            .users
            .create(name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(ref msg) if msg.contains("email") => {
                    AuthError::UserAlreadyExists
                }
                RepositoryError::Conflict(_) => AuthError::NameTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account matches the email.
    /// Returns `AuthError::WrongPassword` if the hash does not verify.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // An unparseable email can't match any stored account
        let email = Email::parse(email).map_err(|_| AuthError::UserNotFound)?;

        // Get user with password hash
        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Verify password
        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::WrongPassword)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::WrongPassword)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testutils;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("pw123456").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pw123456", &hash).is_ok());
        assert!(matches!(
            verify_password("pw123457", &hash),
            Err(AuthError::WrongPassword)
        ));
    }

    #[test]
    fn test_validate_password_length() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = testutils::pool().await;
        let auth = AuthService::new(&pool);

        let registered = auth
            .register("alice", "alice@example.com", "pw123456")
            .await
            .unwrap();

        let logged_in = auth.login("alice@example.com", "pw123456").await.unwrap();
        assert_eq!(logged_in.id, registered.id);
        assert_eq!(logged_in.name, "alice");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let pool = testutils::pool().await;
        let auth = AuthService::new(&pool);

        let result = auth.login("nobody@example.com", "pw123456").await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_never_succeeds() {
        let pool = testutils::pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "alice@example.com", "pw123456")
            .await
            .unwrap();

        let result = auth.login("alice@example.com", "not-the-password").await;
        assert!(matches!(result, Err(AuthError::WrongPassword)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let pool = testutils::pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "alice@example.com", "pw123456")
            .await
            .unwrap();

        let second = auth
            .register("alice-two", "alice@example.com", "pw123456")
            .await;
        assert!(matches!(second, Err(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let pool = testutils::pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "alice@example.com", "pw123456")
            .await
            .unwrap();

        let second = auth
            .register("alice", "other@example.com", "pw123456")
            .await;
        assert!(matches!(second, Err(AuthError::NameTaken)));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password_and_bad_email() {
        let pool = testutils::pool().await;
        let auth = AuthService::new(&pool);

        assert!(matches!(
            auth.register("alice", "alice@example.com", "short").await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.register("alice", "not-an-email", "pw123456").await,
            Err(AuthError::InvalidEmail(_))
        ));
    }
}
