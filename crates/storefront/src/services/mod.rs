//! Business services for the storefront.
//!
//! - [`auth`] - Account registration and credential verification

pub mod auth;
