//! Public pages render from the catalog.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use cafe_nine_core::catalog::{Catalog, CategoryFilter, MenuCategory};
use cafe_nine_integration_tests::TestClient;

#[tokio::test]
async fn test_public_pages_render() {
    let mut client = TestClient::new();
    for path in [
        "/",
        "/about",
        "/menu",
        "/locations",
        "/reservations",
        "/contact",
        "/cart",
        "/auth/login",
        "/auth/register",
    ] {
        let response = client.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert!(response.body.contains("Cafe Nine"), "{path}");
    }
}

#[tokio::test]
async fn test_home_shows_featured_dishes_and_testimonials() {
    let mut client = TestClient::new();
    let catalog = Catalog::builtin();

    let page = client.get("/").await;
    for dish in catalog.menu.featured() {
        assert!(page.body.contains(&dish.name), "{}", dish.name);
    }
    for testimonial in &catalog.testimonials {
        assert!(page.body.contains(&testimonial.name));
    }
}

#[tokio::test]
async fn test_menu_category_filter() {
    let mut client = TestClient::new();
    let catalog = Catalog::builtin();

    let page = client.get("/menu?category=desserts").await;
    assert_eq!(page.status, StatusCode::OK);
    for dish in catalog.menu.list(CategoryFilter::All) {
        let shown = page.body.contains(&format!("<h3>{}</h3>", dish.name));
        assert_eq!(shown, dish.category == MenuCategory::Desserts, "{}", dish.name);
    }
}

#[tokio::test]
async fn test_unknown_category_shows_full_menu() {
    let mut client = TestClient::new();
    let catalog = Catalog::builtin();

    let page = client.get("/menu?category=brunch").await;
    assert_eq!(page.status, StatusCode::OK);
    for dish in catalog.menu.available(CategoryFilter::All) {
        assert!(page.body.contains(&format!("<h3>{}</h3>", dish.name)));
    }
}

#[tokio::test]
async fn test_menu_hides_unavailable_dishes() {
    let mut client = TestClient::new();
    let dish = Catalog::builtin()
        .menu
        .available(CategoryFilter::All)
        .next()
        .cloned()
        .unwrap();
    client
        .state()
        .catalog()
        .write()
        .await
        .menu
        .toggle_availability(&dish.id)
        .unwrap();

    let page = client.get("/menu").await;
    assert!(!page.body.contains(&format!("<h3>{}</h3>", dish.name)));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut client = TestClient::new();
    let response = client.get("/no-such-page").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
