//! User account management commands.
//!
//! The delete guard compares against user id 1, so the first account
//! created (here or through the web form) is the admin. This command exists
//! to provision that account deliberately.

use thiserror::Error;

use coffee_wifi_web::db::create_pool;
use coffee_wifi_web::services::auth::{AuthError, AuthService};

/// Errors that can occur during user management.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Registration failed.
    #[error("Could not create user: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new user account.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the email or name is
/// already taken, or the password does not meet requirements.
pub async fn create(name: &str, email: &str, password: &str) -> Result<(), UserCommandError> {
    let database_url = super::database_url_from_env();
    let pool = create_pool(&database_url).await?;

    let auth = AuthService::new(&pool);
    let user = auth.register(name, email, password).await?;

    tracing::info!(user_id = %user.id, name = %user.name, "User created");
    if user.id.as_i64() == 1 {
        tracing::info!("This account holds the admin identifier and may delete cafes");
    }

    Ok(())
}
