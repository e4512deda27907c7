//! Contact form and newsletter subscription flows.
//!
//! Both forms work without a login. Contact submissions land in
//! `contact_messages`; newsletter signups land in `subscribers` with a
//! case-insensitive uniqueness rule and a redirect back to the page the
//! footer form was submitted from.

use axum::http::StatusCode;
use clothkart_integration_tests::{TestApp, body_string, location};

// =============================================================================
// Contact form
// =============================================================================

#[tokio::test]
async fn test_contact_page_renders_form() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client.get("/contact").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_string(res).await;
    assert!(body.contains("action=\"/contact\""));
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("name=\"email\""));
    assert!(body.contains("name=\"subject\""));
    assert!(body.contains("name=\"message\""));
}

#[tokio::test]
async fn test_contact_submission_stored() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .post_form(
            "/contact",
            &[
                ("name", "Walter White"),
                ("email", "walter@example.com"),
                ("subject", "Order question"),
                ("message", "Where is my blue hoodie?"),
            ],
        )
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/contact");

    let (name, email, subject, message): (String, String, String, String) =
        sqlx::query_as("SELECT name, email, subject, message FROM contact_messages")
            .fetch_one(&app.pool)
            .await
            .expect("Failed to read contact message");

    assert_eq!(name, "Walter White");
    assert_eq!(email, "walter@example.com");
    assert_eq!(subject, "Order question");
    assert_eq!(message, "Where is my blue hoodie?");

    let body = body_string(client.get("/contact").await).await;
    assert!(body.contains("Your message has been sent."));
}

#[tokio::test]
async fn test_contact_subject_is_optional() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    client
        .post_form(
            "/contact",
            &[
                ("name", "Walter White"),
                ("email", "walter@example.com"),
                ("message", "No subject this time."),
            ],
        )
        .await;

    let subject: String = sqlx::query_scalar("SELECT subject FROM contact_messages")
        .fetch_one(&app.pool)
        .await
        .expect("Failed to read subject");
    assert_eq!(subject, "");
}

#[tokio::test]
async fn test_contact_missing_fields_warn() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    client
        .post_form(
            "/contact",
            &[
                ("name", "Walter White"),
                ("email", "walter@example.com"),
                ("message", "   "),
            ],
        )
        .await;

    assert_eq!(app.count("contact_messages").await, 0);

    let body = body_string(client.get("/contact").await).await;
    assert!(body.contains("Please fill in all required fields."));
}

#[tokio::test]
async fn test_contact_invalid_email_rejected() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    client
        .post_form(
            "/contact",
            &[
                ("name", "Walter White"),
                ("email", "not-an-email"),
                ("message", "Hello there."),
            ],
        )
        .await;

    assert_eq!(app.count("contact_messages").await, 0);

    let body = body_string(client.get("/contact").await).await;
    assert!(body.contains("Please enter a valid email address."));
}

// =============================================================================
// Newsletter
// =============================================================================

#[tokio::test]
async fn test_subscribe_stores_email() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .post_form("/subscribe", &[("email", "walter@example.com")])
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    // No Referer header, so the fallback target is the home page
    assert_eq!(location(&res), "/");
    assert_eq!(app.count("subscribers").await, 1);

    let body = body_string(client.get("/").await).await;
    assert!(body.contains("Subscribed successfully."));
}

#[tokio::test]
async fn test_subscribe_duplicate_rejected() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    client
        .post_form("/subscribe", &[("email", "walter@example.com")])
        .await;
    client
        .post_form("/subscribe", &[("email", "walter@example.com")])
        .await;

    assert_eq!(app.count("subscribers").await, 1);

    let body = body_string(client.get("/").await).await;
    assert!(body.contains("You are already subscribed."));
}

#[tokio::test]
async fn test_subscribe_duplicate_differs_only_in_case() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    client
        .post_form("/subscribe", &[("email", "Walter@Example.com")])
        .await;
    client
        .post_form("/subscribe", &[("email", "walter@example.com")])
        .await;

    assert_eq!(app.count("subscribers").await, 1);

    // Stored normalized to lowercase
    let email: String = sqlx::query_scalar("SELECT email FROM subscribers")
        .fetch_one(&app.pool)
        .await
        .expect("Failed to read subscriber");
    assert_eq!(email, "walter@example.com");
}

#[tokio::test]
async fn test_subscribe_redirects_back_to_referring_page() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .post_form_with_header(
            "/subscribe",
            &[("email", "walter@example.com")],
            "referer",
            "http://localhost:3000/shop",
        )
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/shop");
}

#[tokio::test]
async fn test_subscribe_ignores_offsite_referer() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let res = client
        .post_form_with_header(
            "/subscribe",
            &[("email", "walter@example.com")],
            "referer",
            "https://evil.example",
        )
        .await;

    // Only the path of the referrer is ever used
    assert_eq!(location(&res), "/");
}

#[tokio::test]
async fn test_subscribe_rejects_invalid_email() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    client.post_form("/subscribe", &[("email", "nope")]).await;
    assert_eq!(app.count("subscribers").await, 0);

    let body = body_string(client.get("/").await).await;
    assert!(body.contains("Please enter a valid email address."));
}

#[tokio::test]
async fn test_subscribe_rejects_domain_without_dot() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    // Shape-valid but no TLD
    client.post_form("/subscribe", &[("email", "walter@localhost")]).await;
    assert_eq!(app.count("subscribers").await, 0);
}
