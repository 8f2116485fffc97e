//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured dishes, testimonials)
//! GET  /about                  - About page (team, values)
//! GET  /menu?category=         - Menu with category filter
//! GET  /locations              - Restaurant locations
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments, full redirects without HTMX)
//! GET  /cart                   - Cart page with order summary
//! POST /cart/add               - Add one unit (returns count badge, triggers cart-updated)
//! POST /cart/update            - Set quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Review order (redirects to /cart when empty)
//! POST /checkout               - Place order, clear cart, show confirmation
//!
//! # Reservations & Contact
//! GET  /reservations           - Reservation form
//! POST /reservations           - Validate and confirm
//! GET  /contact                - Contact form and FAQs
//! POST /contact                - Validate and acknowledge
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Profile, orders, reservations
//!
//! # Admin (requires admin role)
//! GET  /admin                  - Dashboard
//! GET  /admin/menu             - Menu management
//! POST /admin/menu             - Create item
//! POST /admin/menu/{id}        - Update item
//! POST /admin/menu/{id}/delete - Delete item
//! POST /admin/menu/{id}/toggle - Toggle availability
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod contact;
pub mod home;
pub mod menu;
pub mod pages;
pub mod reservations;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};

use crate::state::AppState;

/// One `<option>` in a form select.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        let selected = value == current;
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}

/// Whether the request was issued by HTMX.
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/menu", get(admin::menu_index).post(admin::create_item))
        .route("/menu/{id}", post(admin::update_item))
        .route("/menu/{id}/delete", post(admin::delete_item))
        .route("/menu/{id}/toggle", post(admin::toggle_item))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/locations", get(pages::locations))
        .route("/menu", get(menu::index))
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout).post(cart::place_order))
        .route(
            "/reservations",
            get(reservations::new).post(reservations::create),
        )
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/account", get(account::index))
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
        .route("/health", get(health))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
