//! Menu page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use cafe_nine_core::catalog::{CategoryFilter, MenuCategory, MenuItem};

use crate::filters;
use crate::state::AppState;

/// Query parameters for the menu page.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// One category tab above the menu grid.
#[derive(Debug, Clone)]
pub struct CategoryTab {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

fn category_tabs(filter: CategoryFilter) -> Vec<CategoryTab> {
    let all = CategoryTab {
        slug: CategoryFilter::All.slug(),
        label: "All",
        active: filter == CategoryFilter::All,
    };
    std::iter::once(all)
        .chain(MenuCategory::ALL.into_iter().map(|category| CategoryTab {
            slug: category.slug(),
            label: category.display_name(),
            active: filter == CategoryFilter::Only(category),
        }))
        .collect()
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub tabs: Vec<CategoryTab>,
    pub items: Vec<MenuItem>,
}

/// Display the menu, optionally narrowed to one category.
///
/// Unknown category slugs fall back to the full menu.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> impl IntoResponse {
    let filter = CategoryFilter::parse(query.category.as_deref());
    let catalog = state.catalog().read().await;
    MenuTemplate {
        tabs: category_tabs(filter),
        items: catalog.menu.available(filter).cloned().collect(),
    }
}
