//! Admin maintenance endpoints: `/initdb` and `/showdata`.
//!
//! Both sit behind the shared admin token, accepted as a bearer header
//! or a `token` query parameter. `/initdb` is the destructive reset;
//! `/showdata` renders every table.

use axum::http::StatusCode;
use clothkart_integration_tests::{TEST_ADMIN_TOKEN, TestApp, body_string, location};

// =============================================================================
// Token guard
// =============================================================================

#[tokio::test]
async fn test_showdata_requires_token() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client.get("/showdata").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(res).await, "Unauthorized");
}

#[tokio::test]
async fn test_initdb_requires_token() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client.get("/initdb").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Nothing was seeded
    assert_eq!(app.count("products").await, 0);
}

#[tokio::test]
async fn test_wrong_bearer_token_rejected() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .get_with_header("/showdata", "authorization", "Bearer wrong-token")
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_query_token_rejected() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client.get("/showdata?token=wrong-token").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_accepted_via_bearer_header() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .get_with_header(
            "/showdata",
            "authorization",
            &format!("Bearer {TEST_ADMIN_TOKEN}"),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_accepted_via_query_param() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .get(&format!("/showdata?token={TEST_ADMIN_TOKEN}"))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

// =============================================================================
// Database reset
// =============================================================================

#[tokio::test]
async fn test_initdb_seeds_sample_products() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .get(&format!("/initdb?token={TEST_ADMIN_TOKEN}"))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
    assert_eq!(app.count("products").await, 3);

    let body = body_string(client.get("/").await).await;
    assert!(body.contains("Database initialized with sample products."));

    let body = body_string(
        client
            .get(&format!("/showdata?token={TEST_ADMIN_TOKEN}"))
            .await,
    )
    .await;
    assert!(body.contains("Red Dress"));
    assert!(body.contains("Blue Jeans"));
    assert!(body.contains("White Shirt"));
    assert!(body.contains("\u{20b9}799.00"));
}

#[tokio::test]
async fn test_initdb_wipes_existing_data() {
    let app = TestApp::spawn().await;

    // Fill every table through the public flows
    let mut user = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;
    user.post_form(
        "/add_to_cart",
        &[
            ("product_name", "Red Dress"),
            ("price", "799.00"),
            ("quantity", "1"),
        ],
    )
    .await;
    user.post_form(
        "/contact",
        &[
            ("name", "Walter White"),
            ("email", "walter@example.com"),
            ("message", "Hello."),
        ],
    )
    .await;
    user.post_form("/subscribe", &[("email", "walter@example.com")])
        .await;

    assert_eq!(app.count("users").await, 1);
    assert_eq!(app.count("cart_items").await, 1);
    assert_eq!(app.count("contact_messages").await, 1);
    assert_eq!(app.count("subscribers").await, 1);

    let mut admin = app.client();
    admin
        .get(&format!("/initdb?token={TEST_ADMIN_TOKEN}"))
        .await;

    assert_eq!(app.count("users").await, 0);
    assert_eq!(app.count("cart_items").await, 0);
    assert_eq!(app.count("contact_messages").await, 0);
    assert_eq!(app.count("subscribers").await, 0);
    assert_eq!(app.count("products").await, 3);
}

#[tokio::test]
async fn test_stale_session_degrades_to_logged_out_after_reset() {
    let app = TestApp::spawn().await;
    let mut user = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    let mut admin = app.client();
    admin
        .get(&format!("/initdb?token={TEST_ADMIN_TOKEN}"))
        .await;

    // The session cookie still exists, but its user row is gone
    let res = user.get("/cart").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/account");

    let body = body_string(user.get("/account").await).await;
    assert!(body.contains("Please log in first."));
    assert!(body.contains("action=\"/login\""));
}

// =============================================================================
// Data dump
// =============================================================================

#[tokio::test]
async fn test_showdata_lists_every_table() {
    let app = TestApp::spawn().await;

    let mut user = app
        .logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;
    user.post_form(
        "/add_to_cart",
        &[
            ("product_name", "Casual Hoodie"),
            ("price", "99.00"),
            ("quantity", "3"),
        ],
    )
    .await;
    user.post_form(
        "/contact",
        &[
            ("name", "Walter White"),
            ("email", "walter@example.com"),
            ("subject", "Sizing"),
            ("message", "Does the hoodie run large?"),
        ],
    )
    .await;
    user.post_form("/subscribe", &[("email", "news@example.com")])
        .await;

    let mut admin = app.client();
    let res = admin
        .get(&format!("/showdata?token={TEST_ADMIN_TOKEN}"))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_string(res).await;
    assert!(body.contains("Users (1)"));
    assert!(body.contains("Cart Items (1)"));
    assert!(body.contains("Contact Messages (1)"));
    assert!(body.contains("Newsletter Subscribers (1)"));

    assert!(body.contains("walter"));
    assert!(body.contains("walter@example.com"));
    assert!(body.contains("Casual Hoodie"));
    assert!(body.contains("\u{20b9}297.00")); // 99 * 3 subtotal
    assert!(body.contains("Sizing"));
    assert!(body.contains("Does the hoodie run large?"));
    assert!(body.contains("news@example.com"));
}

#[tokio::test]
async fn test_showdata_never_exposes_password_hashes() {
    let app = TestApp::spawn().await;

    app.logged_in_client("walter", "walter@example.com", "hunter2hunter2")
        .await;

    let mut admin = app.client();
    let body = body_string(
        admin
            .get(&format!("/showdata?token={TEST_ADMIN_TOKEN}"))
            .await,
    )
    .await;

    assert!(!body.contains("$argon2"));
    assert!(!body.contains("hunter2hunter2"));
}

#[tokio::test]
async fn test_showdata_labels_orphaned_cart_rows_as_guest() {
    let app = TestApp::spawn().await;

    // An orphan can only come from outside the app (manual edits, imports),
    // so plant one directly with enforcement off
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(&app.pool)
        .await
        .expect("Failed to disable foreign keys");
    sqlx::query(
        "INSERT INTO cart_items (product_name, price, quantity, user_id)
         VALUES ('Orphan Tee', 10.0, 1, 4242)",
    )
    .execute(&app.pool)
    .await
    .expect("Failed to insert orphan row");
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&app.pool)
        .await
        .expect("Failed to re-enable foreign keys");

    let mut admin = app.client();
    let body = body_string(
        admin
            .get(&format!("/showdata?token={TEST_ADMIN_TOKEN}"))
            .await,
    )
    .await;

    assert!(body.contains("Orphan Tee"));
    assert!(body.contains("Guest"));
}
