//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use cafe_nine_core::OrderReceipt;

use crate::filters;
use crate::middleware::auth::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub placed_on: String,
    pub item_count: u32,
    pub total: String,
}

impl From<&OrderReceipt> for OrderView {
    fn from(order: &OrderReceipt) -> Self {
        Self {
            number: order.number.clone(),
            placed_on: order.placed_at.format("%b %-d, %Y").to_string(),
            item_count: order.item_count(),
            total: order.summary.total.to_string(),
        }
    }
}

/// Reservation display data for templates.
#[derive(Clone)]
pub struct ReservationView {
    pub confirmation: String,
    pub date: String,
    pub time: String,
    pub party: String,
    pub upcoming: bool,
}

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub user: CurrentUser,
    pub member_since: Option<String>,
    pub orders: Vec<OrderView>,
    pub reservations: Vec<ReservationView>,
}

/// Display account overview page.
///
/// Reservations are matched by email since they can be booked without an
/// account.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let today = state.today();
    let member_since = state
        .users()
        .get(&user.id)
        .await
        .map(|account| account.created_at.format("%B %Y").to_string());

    let orders = state
        .orders()
        .read()
        .await
        .for_customer(&user.id)
        .map(OrderView::from)
        .collect();

    let reservations = state
        .reservations()
        .read()
        .await
        .all()
        .iter()
        .rev()
        .filter(|reservation| reservation.email == user.email)
        .map(|reservation| ReservationView {
            confirmation: reservation.confirmation.clone(),
            date: reservation.date.format("%A, %B %-d, %Y").to_string(),
            time: reservation.time_label(),
            party: reservation.party.to_string(),
            upcoming: reservation.date >= today,
        })
        .collect();

    AccountIndexTemplate {
        user,
        member_since,
        orders,
        reservations,
    }
}
