//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use cafe_nine_core::catalog::{MenuItem, Testimonial};

use crate::filters;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<MenuItem>,
    pub testimonials: Vec<Testimonial>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().read().await;
    HomeTemplate {
        featured: catalog.menu.featured().cloned().collect(),
        testimonials: catalog.testimonials.clone(),
    }
}
