//! Cafe Nine Core - Domain library for the Cafe Nine restaurant site.
//!
//! This crate provides the domain logic shared by all Cafe Nine components:
//! - `storefront` - Public website (menu, cart, reservations, admin menu management)
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types and in-memory logic - no I/O, no HTTP,
//! no session handling. Everything here is synchronous and can be exercised
//! directly from unit tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and roles
//! - [`cart`] - The shopper's cart store
//! - [`checkout`] - Tax and delivery math layered on the cart subtotal
//! - [`catalog`] - Static menu, locations, and marketing content
//! - [`reservation`] - Table reservation validation
//! - [`contact`] - Contact form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod reservation;
pub mod types;

pub use cart::{CartCandidate, CartEvent, CartLine, CartStore, SubscriptionId};
pub use checkout::{OrderLog, OrderReceipt, OrderSummary};
pub use types::*;
