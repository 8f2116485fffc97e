//! Session-related types.
//!
//! Everything a visitor's session carries: identity and cart.

use serde::{Deserialize, Serialize};

use cafe_nine_core::{Email, UserId, UserRole};

use super::user::Account;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    /// Display name shown in the navigation.
    pub name: String,
    pub email: Email,
    pub role: UserRole,
}

impl CurrentUser {
    /// First letter of the name, for the avatar badge.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&Account> for CurrentUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the visitor's cart.
    pub const CART: &str = "cart";
}
