//! User domain types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use cafe_nine_core::{Email, UserId, UserRole};

/// A registered account held by the user directory.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    /// Argon2 PHC string.
    pub password_hash: SecretString,
    pub created_at: DateTime<Utc>,
}
