//! CLI subcommands.

pub mod admin;
pub mod menu;
pub mod quote;

use thiserror::Error;

use cafe_nine_core::PriceError;
use cafe_nine_storefront::services::auth::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Password rejected or hashing failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Unknown menu category.
    #[error("Invalid category: {0}. Valid categories: appetizers, mains, desserts, beverages, bar")]
    InvalidCategory(String),

    /// Subtotal is not a non-negative amount.
    #[error("{0}")]
    InvalidSubtotal(#[from] PriceError),

    /// YAML serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
