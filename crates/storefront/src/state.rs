//! Application state shared across handlers.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use cafe_nine_core::OrderLog;
use cafe_nine_core::catalog::Catalog;
use cafe_nine_core::contact::ContactMessage;
use cafe_nine_core::reservation::ReservationBook;

use crate::config::StorefrontConfig;
use crate::services::auth::UserDirectory;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything here lives in process memory and
/// is lost on restart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: RwLock<Catalog>,
    users: UserDirectory,
    reservations: RwLock<ReservationBook>,
    orders: RwLock<OrderLog>,
    inbox: RwLock<Vec<ContactMessage>>,
}

impl AppState {
    /// Create state with the built-in catalog and, if configured, the seeded
    /// admin account.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    /// Create state around a specific catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let users = UserDirectory::with_admin(config.admin.as_ref());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: RwLock::new(catalog),
                users,
                reservations: RwLock::new(ReservationBook::new()),
                orders: RwLock::new(OrderLog::new()),
                inbox: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Menu, locations, and site copy. The menu is edited by admins.
    #[must_use]
    pub fn catalog(&self) -> &RwLock<Catalog> {
        &self.inner.catalog
    }

    /// Registered accounts.
    #[must_use]
    pub fn users(&self) -> &UserDirectory {
        &self.inner.users
    }

    /// Confirmed table reservations.
    #[must_use]
    pub fn reservations(&self) -> &RwLock<ReservationBook> {
        &self.inner.reservations
    }

    /// Placed orders.
    #[must_use]
    pub fn orders(&self) -> &RwLock<OrderLog> {
        &self.inner.orders
    }

    /// Contact form submissions.
    #[must_use]
    pub fn inbox(&self) -> &RwLock<Vec<ContactMessage>> {
        &self.inner.inbox
    }

    /// The restaurant's current calendar day (UTC).
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
