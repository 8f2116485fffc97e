//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CAFE_BASE_URL` - Public URL for the site (decides the `Secure` cookie flag)
//!
//! ## Optional
//! - `CAFE_HOST` - Bind address (default: 127.0.0.1)
//! - `CAFE_PORT` - Listen port (default: 3000)
//! - `CAFE_ADMIN_EMAIL` - Email of the seeded admin account
//! - `CAFE_ADMIN_PASSWORD_HASH` - Argon2 PHC hash for the seeded admin
//!   (generate with `cafe-cli admin hash-password`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use argon2::password_hash::PasswordHash;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use cafe_nine_core::Email;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Admin account created at startup, if configured
    pub admin: Option<AdminSeed>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Credentials for the admin account seeded into the user directory.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct AdminSeed {
    pub email: Email,
    /// Argon2 PHC string, never a plaintext password.
    pub password_hash: SecretString,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the admin password hash is not an argon2 PHC string.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(&var, "CAFE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CAFE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(&var, "CAFE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CAFE_PORT".to_string(), e.to_string()))?;

        let base_url = get_required_env(&var, "CAFE_BASE_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CAFE_BASE_URL".to_string(), e.to_string())
        })?;

        let admin = AdminSeed::from_vars(&var)?;

        Ok(Self {
            host,
            port,
            base_url,
            admin,
            sentry_dsn: get_optional_env(&var, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&var, "SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_sample_rate(&var, "SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_sample_rate(&var, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Defaults for local development and tests: localhost, no admin, no Sentry.
    #[must_use]
    pub fn local(base_url: impl Into<String>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: base_url.into(),
            admin: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl AdminSeed {
    fn from_vars(var: &impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let email = get_optional_env(var, "CAFE_ADMIN_EMAIL");
        let hash = get_optional_env(var, "CAFE_ADMIN_PASSWORD_HASH");

        match (email, hash) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar(
                "CAFE_ADMIN_PASSWORD_HASH".to_string(),
            )),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar("CAFE_ADMIN_EMAIL".to_string())),
            (Some(email), Some(hash)) => {
                let email = Email::parse(&email).map_err(|e| {
                    ConfigError::InvalidEnvVar("CAFE_ADMIN_EMAIL".to_string(), e.to_string())
                })?;
                let password_hash = SecretString::from(hash);
                validate_password_hash(&password_hash, "CAFE_ADMIN_PASSWORD_HASH")?;
                Ok(Some(Self {
                    email,
                    password_hash,
                }))
            }
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    get_optional_env(var, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    var(key).filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(var: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(var, key).unwrap_or_else(|| default.to_string())
}

/// Parse a 0.0-1.0 sample rate.
fn get_sample_rate(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(var, key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

/// Reject anything that is not an argon2 PHC string, e.g. a plaintext password.
fn validate_password_hash(hash: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let parsed = PasswordHash::new(hash.expose_secret()).map_err(|_| {
        ConfigError::InsecureSecret(
            var_name.to_string(),
            "must be an argon2 PHC string (run `cafe-cli admin hash-password`)".to_string(),
        )
    })?;
    if !parsed.algorithm.as_str().starts_with("argon2") {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("unsupported hash algorithm '{}'", parsed.algorithm),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$W3lN4Yx7nCqK9fmrVq0LqN9d0hLw8Qk7F1d0y4hQ5fw";

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("CAFE_BASE_URL", "http://localhost:3000")]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.admin.is_none());
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_missing_base_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "CAFE_BASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("CAFE_BASE_URL", "http://localhost:3000"),
            ("CAFE_PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CAFE_PORT"));
    }

    #[test]
    fn test_admin_requires_both_vars() {
        let err = load(&[
            ("CAFE_BASE_URL", "https://cafenine.com"),
            ("CAFE_ADMIN_EMAIL", "chef@cafenine.com"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_plaintext_admin_password_rejected() {
        let err = load(&[
            ("CAFE_BASE_URL", "https://cafenine.com"),
            ("CAFE_ADMIN_EMAIL", "chef@cafenine.com"),
            ("CAFE_ADMIN_PASSWORD_HASH", "hunter22"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_admin_seed_loaded() {
        let config = load(&[
            ("CAFE_BASE_URL", "https://cafenine.com"),
            ("CAFE_ADMIN_EMAIL", "Chef@CafeNine.com"),
            ("CAFE_ADMIN_PASSWORD_HASH", HASH),
        ])
        .unwrap();
        let admin = config.admin.unwrap();
        assert_eq!(admin.email.as_str(), "chef@cafenine.com");
        assert!(config.base_url.starts_with("https://"));
    }

    #[test]
    fn test_sample_rate_bounds() {
        let err = load(&[
            ("CAFE_BASE_URL", "http://localhost:3000"),
            ("SENTRY_SAMPLE_RATE", "1.5"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_admin_seed_debug_redacts_hash() {
        let seed = AdminSeed {
            email: Email::parse("chef@cafenine.com").unwrap(),
            password_hash: SecretString::from(HASH),
        };
        let debug_output = format!("{seed:?}");
        assert!(debug_output.contains("chef@cafenine.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }
}
