//! Cart and checkout route handlers.
//!
//! The cart lives in the visitor's session as a serialized [`CartStore`].
//! Each request loads it, applies one mutation, and writes it back only if
//! the cart's version moved. HTMX requests get fragments plus a
//! `cart-updated` trigger; plain form posts are redirected to `/cart`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use cafe_nine_core::{
    CartEvent, CartLine, CartStore, MenuItemId, OrderReceipt, OrderSummary,
    checkout::FREE_DELIVERY_THRESHOLD,
};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::routes::is_htmx;
use crate::state::AppState;

/// HTMX event fired whenever the cart changes.
pub const CART_UPDATED_TRIGGER: &str = "cart-updated";

/// One cart line for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub increment: i64,
    pub decrement: i64,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let quantity = i64::from(line.quantity());
        Self {
            id: line.id().to_string(),
            name: line.name().to_string(),
            image: line.image().to_string(),
            price: line.price().to_string(),
            quantity: line.quantity(),
            line_total: line.line_total().to_string(),
            increment: quantity + 1,
            decrement: quantity - 1,
        }
    }
}

/// Order summary strings for templates.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub subtotal: String,
    pub tax: String,
    pub delivery: String,
    pub total: String,
    pub free_delivery_hint: Option<String>,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.subtotal.to_string(),
            tax: summary.tax.to_string(),
            delivery: if summary.has_free_delivery() {
                "FREE".to_string()
            } else {
                summary.delivery_fee.to_string()
            },
            total: summary.total.to_string(),
            free_delivery_hint: summary.free_delivery_shortfall.map(|shortfall| {
                format!(
                    "Add {shortfall} more for free delivery on orders over {FREE_DELIVERY_THRESHOLD}"
                )
            }),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub summary: SummaryView,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            item_count: cart.total_item_count(),
            summary: SummaryView::from(&OrderSummary::for_cart(cart)),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

fn log_cart_event(event: &CartEvent, cart: &CartStore) {
    tracing::debug!(
        ?event,
        items = cart.total_item_count(),
        subtotal = %cart.total_price(),
        "Cart changed"
    );
}

/// Load the visitor's cart from the session, empty if there is none.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn load_cart(session: &Session) -> Result<CartStore> {
    let mut cart: CartStore = session
        .get(session_keys::CART)
        .await?
        .unwrap_or_default();
    cart.subscribe(log_cart_event);
    Ok(cart)
}

async fn save_cart(session: &Session, cart: &CartStore) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Apply one mutation and persist the cart if it changed.
///
/// Returns the cart and whether it changed.
async fn mutate_cart(
    session: &Session,
    mutation: impl FnOnce(&mut CartStore),
) -> Result<(CartStore, bool)> {
    let mut cart = load_cart(session).await?;
    let before = cart.version();
    mutation(&mut cart);
    let changed = cart.version() != before;
    if changed {
        save_cart(session, &cart).await?;
    }
    Ok((cart, changed))
}

/// Response for update/remove/clear: the items fragment for HTMX, a
/// redirect otherwise.
fn cart_items_response(headers: &HeaderMap, cart: &CartStore, changed: bool) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/cart").into_response();
    }
    let fragment = CartItemsTemplate {
        cart: CartView::from(cart),
    };
    if changed {
        (
            AppendHeaders([("HX-Trigger", CART_UPDATED_TRIGGER)]),
            fragment,
        )
            .into_response()
    } else {
        fragment.into_response()
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
}

/// Update quantity form data. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout review page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order_number: String,
    pub cart: CartView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add one unit of a dish (HTMX).
///
/// Returns the count badge with a `cart-updated` trigger.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = MenuItemId::new(form.id);
    let candidate = {
        let catalog = state.catalog().read().await;
        let item = catalog
            .menu
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;
        if !item.available {
            return Err(AppError::BadRequest(format!(
                "{} is not available right now",
                item.name
            )));
        }
        item.cart_candidate()
    };

    add_breadcrumb("cart", "Added to cart", &[("menu_item_id", id.as_str())]);
    let (cart, _) = mutate_cart(&session, |cart| cart.add_item(candidate)).await?;

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_TRIGGER)]),
        CartCountTemplate {
            count: cart.total_item_count(),
        },
    )
        .into_response())
}

/// Set a line's quantity (HTMX).
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = MenuItemId::new(form.id);
    let (cart, changed) =
        mutate_cart(&session, |cart| cart.update_quantity(&id, form.quantity)).await?;
    Ok(cart_items_response(&headers, &cart, changed))
}

/// Remove a line (HTMX).
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = MenuItemId::new(form.id);
    let (cart, changed) = mutate_cart(&session, |cart| cart.remove_item(&id)).await?;
    Ok(cart_items_response(&headers, &cart, changed))
}

/// Empty the cart (HTMX).
#[instrument(skip(session, headers))]
pub async fn clear(session: Session, headers: HeaderMap) -> Result<Response> {
    let (cart, changed) = mutate_cart(&session, CartStore::clear_cart).await?;
    Ok(cart_items_response(&headers, &cart, changed))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_item_count(),
    })
}

/// Review the order before placing it.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }
    Ok(CheckoutTemplate {
        cart: CartView::from(&cart),
    }
    .into_response())
}

/// Place the order: record a receipt, clear the cart, confirm.
#[instrument(skip(state, session, user))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    let placed_by = user.map(|user| user.id);
    let Some(receipt) = OrderReceipt::from_cart(&cart, placed_by) else {
        return Ok(Redirect::to("/cart").into_response());
    };

    let order_number = receipt.number.clone();
    let ordered = CartView::from(&cart);
    state.orders().write().await.record(receipt);
    add_breadcrumb("checkout", "Order placed", &[("order", order_number.as_str())]);

    cart.clear_cart();
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_TRIGGER)]),
        ConfirmationTemplate {
            order_number,
            cart: ordered,
        },
    )
        .into_response())
}
