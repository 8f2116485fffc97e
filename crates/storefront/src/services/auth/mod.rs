//! Authentication service.
//!
//! Accounts live in an in-memory [`UserDirectory`]. Passwords are stored only
//! as argon2 PHC hashes. Handlers depend on the [`CredentialVerifier`] trait
//! for login so the backing store can change without touching routes.

mod error;

pub use error::AuthError;

use std::future::Future;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use uuid::Uuid;

use cafe_nine_core::{Email, UserId, UserRole};

use crate::config::AdminSeed;
use crate::models::Account;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks an email/password pair and returns the matching account.
pub trait CredentialVerifier: Send + Sync {
    /// Verify credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
    /// password; the two cases are indistinguishable to the caller.
    fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Account, AuthError>> + Send;
}

/// Registration input.
#[derive(Debug)]
pub struct NewAccount<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
}

/// In-memory account store.
#[derive(Debug, Default)]
pub struct UserDirectory {
    accounts: RwLock<Vec<Account>>,
}

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding only the configured admin, if any.
    #[must_use]
    pub fn with_admin(seed: Option<&AdminSeed>) -> Self {
        let accounts = seed
            .map(|seed| Account {
                id: new_user_id(),
                name: "Administrator".to_string(),
                email: seed.email.clone(),
                role: UserRole::Admin,
                password_hash: seed.password_hash.clone(),
                created_at: Utc::now(),
            })
            .into_iter()
            .collect();

        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Register a customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyName`, `AuthError::InvalidEmail`,
    /// `AuthError::PasswordMismatch`, or `AuthError::WeakPassword` for bad
    /// input, and `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(&self, input: NewAccount<'_>) -> Result<Account, AuthError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }
        let email = Email::parse(input.email)?;
        if input.password != input.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        validate_password(input.password)?;
        let password_hash = hash_password(input.password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|account| account.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let account = Account {
            id: new_user_id(),
            name: name.to_string(),
            email,
            role: UserRole::Customer,
            password_hash: SecretString::from(password_hash),
            created_at: Utc::now(),
        };
        accounts.push(account.clone());
        drop(accounts);

        tracing::info!(user_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Look up an account by id.
    pub async fn get(&self, id: &UserId) -> Option<Account> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|account| &account.id == id)
            .cloned()
    }

    /// Number of registered accounts, admins included.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Number of customer accounts.
    pub async fn customer_count(&self) -> usize {
        self.accounts
            .read()
            .await
            .iter()
            .filter(|account| !account.role.is_admin())
            .count()
    }
}

impl CredentialVerifier for UserDirectory {
    fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Account, AuthError>> + Send {
        async move {
            let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
            let account = self
                .accounts
                .read()
                .await
                .iter()
                .find(|account| account.email == email)
                .cloned()
                .ok_or(AuthError::InvalidCredentials)?;

            verify_password(password, account.password_hash.expose_secret())?;
            Ok(account)
        }
    }
}

fn new_user_id() -> UserId {
    UserId::new(Uuid::new_v4().to_string())
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the hash is malformed or the
/// password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
