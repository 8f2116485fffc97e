//! Contact page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use cafe_nine_core::catalog::{Faq, Location};
use cafe_nine_core::contact::{ContactForm, ContactSubject};

use crate::error::capitalize;
use crate::filters;
use crate::routes::SelectOption;
use crate::state::AppState;

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub form: ContactForm,
    pub error: Option<String>,
    /// Set after a successful submission.
    pub sent_to: Option<String>,
    pub subject_options: Vec<SelectOption>,
    pub faqs: Vec<Faq>,
    pub locations: Vec<Location>,
}

async fn contact_page(
    state: &AppState,
    form: ContactForm,
    error: Option<String>,
    sent_to: Option<String>,
) -> ContactTemplate {
    let current = if form.subject.is_empty() {
        ContactSubject::default().value()
    } else {
        form.subject.as_str()
    };
    let subject_options = ContactSubject::ALL
        .into_iter()
        .map(|subject| SelectOption::new(subject.value(), subject.label(), current))
        .collect();
    let catalog = state.catalog().read().await;

    ContactTemplate {
        subject_options,
        faqs: catalog.faqs.clone(),
        locations: catalog.locations.clone(),
        form,
        error,
        sent_to,
    }
}

/// Display the contact form and FAQs.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    contact_page(&state, ContactForm::default(), None, None).await
}

/// Handle a contact form submission.
///
/// Valid messages land in the in-memory inbox shown on the admin dashboard.
#[instrument(skip(state, form), fields(subject = %form.subject))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Response {
    match form.validate() {
        Ok(message) => {
            tracing::info!(
                subject = message.subject.value(),
                email = %message.email,
                "Contact message received"
            );
            let sent_to = message.email.to_string();
            state.inbox().write().await.push(message);
            contact_page(&state, ContactForm::default(), None, Some(sent_to))
                .await
                .into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "Contact message rejected");
            let page = contact_page(&state, form, Some(capitalize(&e.to_string())), None).await;
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
    }
}
