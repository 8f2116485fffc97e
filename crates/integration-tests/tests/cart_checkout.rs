//! Cart and checkout flows through the assembled router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use cafe_nine_core::catalog::{Catalog, CategoryFilter, MenuItem};
use cafe_nine_core::{OrderSummary, Price};
use cafe_nine_integration_tests::TestClient;

fn available_dishes() -> Vec<MenuItem> {
    Catalog::builtin()
        .menu
        .available(CategoryFilter::All)
        .cloned()
        .collect()
}

fn first_dish() -> MenuItem {
    available_dishes().into_iter().next().unwrap()
}

#[tokio::test]
async fn test_add_to_cart_updates_badge_and_triggers_event() {
    let mut client = TestClient::new();
    let dish = first_dish();

    let response = client
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains(r#"<span class="badge">1</span>"#));

    client
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;
    let count = client.get("/cart/count").await;
    assert!(count.body.contains(r#"<span class="badge">2</span>"#));
}

#[tokio::test]
async fn test_cart_page_shows_line_totals_and_summary() {
    let mut client = TestClient::new();
    let dish = first_dish();
    for _ in 0..2 {
        client
            .post_htmx("/cart/add", &[("id", dish.id.as_str())])
            .await;
    }

    let page = client.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);

    let subtotal = dish.price * 2;
    let summary = OrderSummary::from_subtotal(subtotal);
    assert!(page.body.contains(&subtotal.to_string()));
    assert!(page.body.contains(&summary.tax.to_string()));
    assert!(page.body.contains(&summary.total.to_string()));
    assert!(page.body.contains("2 items"));
}

#[tokio::test]
async fn test_cart_is_per_visitor() {
    let mut alice = TestClient::new();
    let dish = first_dish();
    alice
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;

    let mut bob = alice.fresh_visitor();
    let count = bob.get("/cart/count").await;
    assert!(!count.body.contains("badge"));
}

#[tokio::test]
async fn test_plain_form_post_redirects_to_cart() {
    let mut client = TestClient::new();
    let dish = first_dish();

    let response = client
        .post_form("/cart/add", &[("id", dish.id.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
}

#[tokio::test]
async fn test_add_unknown_dish_is_not_found() {
    let mut client = TestClient::new();
    let response = client.post_htmx("/cart/add", &[("id", "no-such-dish")]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_unavailable_dish_is_rejected() {
    let mut client = TestClient::new();
    let dish = first_dish();
    client
        .state()
        .catalog()
        .write()
        .await
        .menu
        .toggle_availability(&dish.id)
        .unwrap();

    let response = client
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut client = TestClient::new();
    let dish = first_dish();
    client
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;

    let response = client
        .post_htmx("/cart/update", &[("id", dish.id.as_str()), ("quantity", "0")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_noop_update_does_not_trigger_event() {
    let mut client = TestClient::new();
    let dish = first_dish();
    client
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;

    let response = client
        .post_htmx("/cart/update", &[("id", dish.id.as_str()), ("quantity", "1")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("hx-trigger").is_none());
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut client = TestClient::new();
    let dishes = available_dishes();
    let (first, second) = (dishes.first().unwrap(), dishes.get(1).unwrap());
    client
        .post_htmx("/cart/add", &[("id", first.id.as_str())])
        .await;
    client
        .post_htmx("/cart/add", &[("id", second.id.as_str())])
        .await;

    let response = client
        .post_htmx("/cart/remove", &[("id", first.id.as_str())])
        .await;
    assert!(!response.body.contains(&format!(r#"name="id" value="{}""#, first.id)));
    assert!(response.body.contains(&format!(r#"name="id" value="{}""#, second.id)));

    let response = client.post_htmx("/cart/clear", &[]).await;
    assert!(response.body.contains("Your cart is empty"));

    // Clearing an empty cart changes nothing
    let response = client.post_htmx("/cart/clear", &[]).await;
    assert!(response.header("hx-trigger").is_none());
}

#[tokio::test]
async fn test_free_delivery_hint_below_threshold() {
    let mut client = TestClient::new();
    let dish = first_dish();
    assert!(dish.price < Price::from_whole(50));
    client
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("more for free delivery"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects() {
    let mut client = TestClient::new();

    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));

    let response = client.post_form("/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(client.state().orders().read().await.is_empty());
}

#[tokio::test]
async fn test_place_order_records_receipt_and_clears_cart() {
    let mut client = TestClient::new();
    let dish = first_dish();
    client
        .post_htmx("/cart/add", &[("id", dish.id.as_str())])
        .await;

    let review = client.get("/checkout").await;
    assert_eq!(review.status, StatusCode::OK);
    assert!(review.body.contains(&dish.name));

    let confirmation = client.post_form("/checkout", &[]).await;
    assert_eq!(confirmation.status, StatusCode::OK);
    assert!(confirmation.body.contains("CN-"));

    let orders = client.state().orders().read().await;
    assert_eq!(orders.len(), 1);
    let receipt = orders.recent(1).next().unwrap();
    assert!(confirmation.body.contains(&receipt.number));
    assert_eq!(receipt.item_count(), 1);
    assert!(receipt.placed_by.is_none());
    drop(orders);

    let count = client.get("/cart/count").await;
    assert!(!count.body.contains("badge"));
}
