//! Admin dashboard and menu management route handlers.
//!
//! Every handler requires the admin role. Menu edits apply to the live
//! catalog immediately; carts keep the snapshot taken when a dish was added.
//! Form failures redirect back to `/admin/menu` with an `?error=` code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use cafe_nine_core::catalog::{CategoryFilter, MenuCategory, MenuDraft, MenuError, MenuItem};
use cafe_nine_core::{MenuItemId, OrderReceipt, Price};

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::routes::SelectOption;
use crate::state::AppState;

/// Orders shown on the dashboard.
const RECENT_ORDER_LIMIT: usize = 5;

// =============================================================================
// View Types
// =============================================================================

/// Dashboard metrics.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub orders_today: usize,
    pub revenue_today: String,
    pub upcoming_reservations: usize,
    pub customers: usize,
    pub messages: usize,
    pub menu_items: usize,
}

/// Recent order view for dashboard.
#[derive(Debug, Clone)]
pub struct RecentOrderView {
    pub number: String,
    pub placed_at: String,
    pub item_count: u32,
    pub total: String,
    pub guest: bool,
}

impl From<&OrderReceipt> for RecentOrderView {
    fn from(order: &OrderReceipt) -> Self {
        Self {
            number: order.number.clone(),
            placed_at: order.placed_at.format("%b %-d, %-I:%M %p").to_string(),
            item_count: order.item_count(),
            total: order.summary.total.to_string(),
            guest: order.placed_by.is_none(),
        }
    }
}

/// One row of the menu management table, with its edit form options.
#[derive(Debug, Clone)]
pub struct MenuRowView {
    pub item: MenuItem,
    /// Bare decimal for the price input, e.g. `14.00`.
    pub price_input: String,
    pub category_options: Vec<SelectOption>,
}

impl From<&MenuItem> for MenuRowView {
    fn from(item: &MenuItem) -> Self {
        Self {
            price_input: format!("{:.2}", item.price.amount()),
            category_options: category_options(item.category.slug()),
            item: item.clone(),
        }
    }
}

fn category_options(current: &str) -> Vec<SelectOption> {
    MenuCategory::ALL
        .into_iter()
        .map(|category| SelectOption::new(category.slug(), category.display_name(), current))
        .collect()
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: CurrentUser,
    pub metrics: DashboardMetrics,
    pub recent_orders: Vec<RecentOrderView>,
}

/// Menu management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/menu.html")]
pub struct MenuManagementTemplate {
    pub admin_user: CurrentUser,
    pub rows: Vec<MenuRowView>,
    pub new_category_options: Vec<SelectOption>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

// =============================================================================
// Forms
// =============================================================================

/// Create/update menu item form data.
#[derive(Debug, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    /// Checkbox: present when checked.
    pub available: Option<String>,
}

impl MenuItemForm {
    /// Convert into a draft, returning an `?error=` code on bad input.
    fn into_draft(self) -> Result<MenuDraft, &'static str> {
        let price = self.price.parse::<Price>().map_err(|_| "price")?;
        let category = self.category.parse::<MenuCategory>().map_err(|_| "category")?;
        Ok(MenuDraft {
            name: self.name,
            description: self.description,
            price,
            category,
            image: self.image,
            available: self.available.is_some(),
        })
    }
}

/// Query parameters for error/notice display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

fn error_message(code: &str) -> String {
    match code {
        "name" => "Item name cannot be empty.",
        "price" => "Price must be a non-negative amount, e.g. 12.50.",
        "category" => "Choose a valid category.",
        "not_found" => "That menu item no longer exists.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn notice_message(code: &str) -> Option<String> {
    match code {
        "created" => Some("Menu item added.".to_string()),
        "updated" => Some("Menu item updated.".to_string()),
        "deleted" => Some("Menu item deleted.".to_string()),
        "toggled" => Some("Availability updated.".to_string()),
        _ => None,
    }
}

const fn menu_error_code(err: &MenuError) -> &'static str {
    match err {
        MenuError::NotFound(_) => "not_found",
        MenuError::EmptyName => "name",
    }
}

fn back_to_menu(outcome: Result<&'static str, &'static str>) -> Response {
    let target = match outcome {
        Ok(notice) => format!("/admin/menu?notice={notice}"),
        Err(error) => format!("/admin/menu?error={error}"),
    };
    Redirect::to(&target).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Dashboard page handler.
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let today = state.today();

    let (orders_today, revenue_today, recent_orders) = {
        let orders = state.orders().read().await;
        (
            orders.count_on(today),
            orders.revenue_on(today).to_string(),
            orders
                .recent(RECENT_ORDER_LIMIT)
                .map(RecentOrderView::from)
                .collect(),
        )
    };
    let upcoming_reservations = state.reservations().read().await.upcoming(today);
    let messages = state.inbox().read().await.len();
    let menu_items = state.catalog().read().await.menu.len();
    let customers = state.users().customer_count().await;

    DashboardTemplate {
        admin_user: admin,
        metrics: DashboardMetrics {
            orders_today,
            revenue_today,
            upcoming_reservations,
            customers,
            messages,
            menu_items,
        },
        recent_orders,
    }
}

/// Menu management page: every item, available or not.
#[instrument(skip(admin, state))]
pub async fn menu_index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let rows = state
        .catalog()
        .read()
        .await
        .menu
        .list(CategoryFilter::All)
        .map(MenuRowView::from)
        .collect();

    MenuManagementTemplate {
        admin_user: admin,
        rows,
        new_category_options: category_options(MenuCategory::Mains.slug()),
        error: query.error.as_deref().map(error_message),
        notice: query.notice.as_deref().and_then(notice_message),
    }
}

/// Create a menu item.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<MenuItemForm>,
) -> Response {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(code) => return back_to_menu(Err(code)),
    };

    let created = state.catalog().write().await.menu.create(draft);
    match created {
        Ok(item) => {
            tracing::info!(menu_item_id = %item.id, name = %item.name, "Menu item created");
            add_breadcrumb("admin", "Menu item created", &[("menu_item_id", item.id.as_str())]);
            back_to_menu(Ok("created"))
        }
        Err(e) => back_to_menu(Err(menu_error_code(&e))),
    }
}

/// Update a menu item's editable fields.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn update_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MenuItemForm>,
) -> Response {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(code) => return back_to_menu(Err(code)),
    };

    let id = MenuItemId::new(id);
    let updated = state.catalog().write().await.menu.update(&id, draft);
    match updated {
        Ok(item) => {
            tracing::info!(menu_item_id = %item.id, "Menu item updated");
            back_to_menu(Ok("updated"))
        }
        Err(e) => back_to_menu(Err(menu_error_code(&e))),
    }
}

/// Delete a menu item.
///
/// Carts that already hold the dish keep their line.
#[instrument(skip_all, fields(admin_id = %admin.id, menu_item_id = %id))]
pub async fn delete_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = MenuItemId::new(id);
    let deleted = state.catalog().write().await.menu.delete(&id);
    match deleted {
        Ok(item) => {
            tracing::info!(menu_item_id = %item.id, name = %item.name, "Menu item deleted");
            back_to_menu(Ok("deleted"))
        }
        Err(e) => back_to_menu(Err(menu_error_code(&e))),
    }
}

/// Flip a menu item's availability.
#[instrument(skip_all, fields(admin_id = %admin.id, menu_item_id = %id))]
pub async fn toggle_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = MenuItemId::new(id);
    let toggled = state.catalog().write().await.menu.toggle_availability(&id);
    match toggled {
        Ok(available) => {
            tracing::info!(menu_item_id = %id, available, "Menu item availability changed");
            back_to_menu(Ok("toggled"))
        }
        Err(e) => back_to_menu(Err(menu_error_code(&e))),
    }
}
