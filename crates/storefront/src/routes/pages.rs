//! Static content page route handlers: about and locations.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use cafe_nine_core::catalog::{BrandValue, Location, TeamMember};

use crate::filters;
use crate::state::AppState;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub team: Vec<TeamMember>,
    pub values: Vec<BrandValue>,
}

/// Locations page template.
#[derive(Template, WebTemplate)]
#[template(path = "locations.html")]
pub struct LocationsTemplate {
    pub locations: Vec<Location>,
}

/// Display the About page.
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().read().await;
    AboutTemplate {
        team: catalog.team.clone(),
        values: catalog.values.clone(),
    }
}

/// Display the restaurant locations.
#[instrument(skip(state))]
pub async fn locations(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().read().await;
    LocationsTemplate {
        locations: catalog.locations.clone(),
    }
}
