//! User domain types.
//!
//! These types represent validated domain objects separate from database row
//! types; the password hash never leaves the repository layer.

use chrono::{DateTime, Utc};

use coffee_wifi_core::{Email, UserId};

/// A registered account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name shown as the contributor of a cafe.
    pub name: String,
    /// Login email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
