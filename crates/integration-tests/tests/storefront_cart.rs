//! Cart flows: adding, viewing, and removing items.
//!
//! The cart requires a logged-in user everywhere, stores a price
//! snapshot per row, and scopes both the total and row removal to the
//! session's user.

use axum::http::StatusCode;
use clothkart_integration_tests::{TestApp, body_string, location};

// =============================================================================
// Authentication gate
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_requires_login() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Red Dress"),
                ("price", "799.00"),
                ("quantity", "1"),
            ],
        )
        .await;

    // Redirected to the account page, and no row was written
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/account");
    assert_eq!(app.count("cart_items").await, 0);

    let body = body_string(client.get("/account").await).await;
    assert!(body.contains("Please log in first."));
}

#[tokio::test]
async fn test_cart_page_requires_login() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client.get("/cart").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/account");
}

#[tokio::test]
async fn test_remove_requires_login() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client.get("/remove_from_cart/1").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/account");
}

// =============================================================================
// Adding items
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_inserts_snapshot_row() {
    let app = TestApp::spawn().await;
    let mut client = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    let res = client
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Red Dress"),
                ("price", "799.00"),
                ("quantity", "2"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/cart");

    let user_id = app.user_id("walter@example.com").await;
    let (name, price, quantity, owner): (String, f64, i64, i64) = sqlx::query_as(
        "SELECT product_name, price, quantity, user_id FROM cart_items",
    )
    .fetch_one(&app.pool)
    .await
    .expect("Failed to read cart row");

    assert_eq!(name, "Red Dress");
    assert!((price - 799.0).abs() < f64::EPSILON);
    assert_eq!(quantity, 2);
    assert_eq!(owner, user_id.as_i64());

    let body = body_string(client.get("/cart").await).await;
    assert!(body.contains("Item added to cart."));
    assert!(body.contains("Red Dress"));
    assert!(body.contains("\u{20b9}1598.00"));
}

#[tokio::test]
async fn test_add_to_cart_defaults_quantity_to_one() {
    let app = TestApp::spawn().await;
    let mut client = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    // No quantity field at all
    client
        .post_form(
            "/add_to_cart",
            &[("product_name", "Blue Jeans"), ("price", "1199.00")],
        )
        .await;

    let quantity: i64 = sqlx::query_scalar("SELECT quantity FROM cart_items")
        .fetch_one(&app.pool)
        .await
        .expect("Failed to read quantity");
    assert_eq!(quantity, 1);
}

#[tokio::test]
async fn test_add_to_cart_clamps_zero_quantity() {
    let app = TestApp::spawn().await;
    let mut client = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    client
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Blue Jeans"),
                ("price", "1199.00"),
                ("quantity", "0"),
            ],
        )
        .await;

    let quantity: i64 = sqlx::query_scalar("SELECT quantity FROM cart_items")
        .fetch_one(&app.pool)
        .await
        .expect("Failed to read quantity");
    assert_eq!(quantity, 1);
}

#[tokio::test]
async fn test_add_to_cart_rejects_negative_price() {
    let app = TestApp::spawn().await;
    let mut client = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    let res = client
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Red Dress"),
                ("price", "-5.00"),
                ("quantity", "1"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/shop");
    assert_eq!(app.count("cart_items").await, 0);

    let body = body_string(client.get("/shop").await).await;
    assert!(body.contains("Invalid product data."));
}

// =============================================================================
// Viewing the cart
// =============================================================================

#[tokio::test]
async fn test_cart_empty_state() {
    let app = TestApp::spawn().await;
    let mut client = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    let body = body_string(client.get("/cart").await).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_cart_total_sums_only_own_rows() {
    let app = TestApp::spawn().await;

    let mut walter = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;
    let mut skyler = app
        .logged_in_client("skyler", "skyler@example.com", "hunter2hunter2")
        .await;

    walter
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Cartoon Floral Art T-Shirt"),
                ("price", "49.00"),
                ("quantity", "2"),
            ],
        )
        .await;
    walter
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Casual Hoodie"),
                ("price", "99.00"),
                ("quantity", "1"),
            ],
        )
        .await;
    skyler
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Red Dress"),
                ("price", "799.00"),
                ("quantity", "1"),
            ],
        )
        .await;

    // 49 * 2 + 99 = 197, without Skyler's 799
    let body = body_string(walter.get("/cart").await).await;
    assert!(body.contains("\u{20b9}197.00"));
    assert!(!body.contains("\u{20b9}996.00"));
    assert!(!body.contains("Red Dress"));

    let body = body_string(skyler.get("/cart").await).await;
    assert!(body.contains("\u{20b9}799.00"));
    assert!(!body.contains("Casual Hoodie"));
}

// =============================================================================
// Removing items
// =============================================================================

#[tokio::test]
async fn test_remove_own_item() {
    let app = TestApp::spawn().await;
    let mut client = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    client
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Red Dress"),
                ("price", "799.00"),
                ("quantity", "1"),
            ],
        )
        .await;

    let id: i64 = sqlx::query_scalar("SELECT id FROM cart_items")
        .fetch_one(&app.pool)
        .await
        .expect("Failed to read cart row id");

    let res = client.get(&format!("/remove_from_cart/{id}")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/cart");
    assert_eq!(app.count("cart_items").await, 0);

    let body = body_string(client.get("/cart").await).await;
    assert!(body.contains("Item removed from cart."));
}

#[tokio::test]
async fn test_remove_ignores_other_users_rows() {
    let app = TestApp::spawn().await;

    let mut walter = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;
    let mut skyler = app
        .logged_in_client("skyler", "skyler@example.com", "hunter2hunter2")
        .await;

    walter
        .post_form(
            "/add_to_cart",
            &[
                ("product_name", "Red Dress"),
                ("price", "799.00"),
                ("quantity", "1"),
            ],
        )
        .await;

    let id: i64 = sqlx::query_scalar("SELECT id FROM cart_items")
        .fetch_one(&app.pool)
        .await
        .expect("Failed to read cart row id");

    // Another user hitting the same id behaves like a nonexistent id
    let res = skyler.get(&format!("/remove_from_cart/{id}")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/cart");
    assert_eq!(app.count("cart_items").await, 1);

    // The owner still sees the item
    let body = body_string(walter.get("/cart").await).await;
    assert!(body.contains("Red Dress"));
}

#[tokio::test]
async fn test_remove_nonexistent_id_redirects_quietly() {
    let app = TestApp::spawn().await;
    let mut client = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    let res = client.get("/remove_from_cart/9999").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/cart");

    // No removal flash for a miss
    let body = body_string(client.get("/cart").await).await;
    assert!(!body.contains("Item removed from cart."));
}
