//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use secrecy::SecretString;

/// Resolve the database URL the same way the web binary does: the dedicated
/// variable first, the generic `DATABASE_URL` second, the local on-disk file
/// as the default.
pub fn database_url_from_env() -> SecretString {
    dotenvy::dotenv().ok();

    if let Ok(value) = std::env::var("COFFEE_WIFI_DATABASE_URL") {
        return SecretString::from(value);
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return SecretString::from(value);
    }
    SecretString::from("sqlite:cafes.db")
}
