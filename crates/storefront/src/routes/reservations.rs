//! Table reservation route handlers.
//!
//! A failed submission re-renders the form with the entered values and a
//! 422 status; a valid one is recorded and confirmed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use cafe_nine_core::reservation::{
    PartySize, Reservation, ReservationRequest, TablePreference, service_slots, slot_label,
};

use crate::error::{add_breadcrumb, capitalize};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::SelectOption;
use crate::state::AppState;

/// Reservation form template.
#[derive(Template, WebTemplate)]
#[template(path = "reservations/new.html")]
pub struct ReservationFormTemplate {
    pub form: ReservationRequest,
    pub error: Option<String>,
    /// Earliest bookable date, `YYYY-MM-DD`.
    pub min_date: String,
    pub time_options: Vec<SelectOption>,
    pub party_options: Vec<SelectOption>,
    pub table_options: Vec<SelectOption>,
}

impl ReservationFormTemplate {
    fn new(form: ReservationRequest, error: Option<String>, state: &AppState) -> Self {
        let time_options = service_slots()
            .map(|slot| {
                SelectOption::new(slot.format("%H:%M").to_string(), slot_label(slot), &form.time)
            })
            .collect();
        let party_options = PartySize::options()
            .map(|party| SelectOption::new(party.value(), party.to_string(), &form.guests))
            .collect();
        let table_options = TablePreference::ALL
            .into_iter()
            .map(|pref| SelectOption::new(pref.value(), pref.label(), &form.table_preference))
            .collect();

        Self {
            min_date: state.today().format("%Y-%m-%d").to_string(),
            form,
            error,
            time_options,
            party_options,
            table_options,
        }
    }
}

/// Reservation confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "reservations/confirmed.html")]
pub struct ReservationConfirmedTemplate {
    pub reservation: Reservation,
}

/// Display the reservation form.
///
/// Signed-in guests get their name and email filled in.
#[instrument(skip(state, user))]
pub async fn new(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> Response {
    let mut form = ReservationRequest {
        guests: PartySize::Guests(2).value(),
        ..ReservationRequest::default()
    };
    if let Some(user) = user {
        form.name = user.name;
        form.email = user.email.to_string();
    }
    ReservationFormTemplate::new(form, None, &state).into_response()
}

/// Validate and record a reservation.
#[instrument(skip(state, form), fields(date = %form.date, time = %form.time))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ReservationRequest>,
) -> Response {
    let booked = state.reservations().write().await.book(&form, state.today());

    match booked {
        Ok(reservation) => {
            add_breadcrumb(
                "reservation",
                "Reservation booked",
                &[("confirmation", reservation.confirmation.as_str())],
            );
            ReservationConfirmedTemplate { reservation }.into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "Reservation rejected");
            let page = ReservationFormTemplate::new(form, Some(capitalize(&e.to_string())), &state);
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
    }
}
