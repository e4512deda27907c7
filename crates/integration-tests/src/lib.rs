//! In-process test harness for the ClothKart storefront.
//!
//! Each test builds the production router through
//! [`clothkart_storefront::app`] against a fresh in-memory `SQLite`
//! database and drives it with `tower::ServiceExt::oneshot`. The
//! [`TestClient`] carries the session cookie between requests the way a
//! browser would, so logged-in flows and flash messages behave exactly
//! as they do in production.
//!
//! # Example
//!
//! ```rust,ignore
//! let app = TestApp::spawn().await;
//! let mut client = app.client();
//!
//! let res = client.get("/").await;
//! assert_eq!(res.status(), StatusCode::OK);
//! ```

// Panicking is the failure mode here; every helper is called from tests.
#![allow(clippy::missing_panics_doc)]
#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header, request};
use axum::response::Response;
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use clothkart_core::UserId;
use clothkart_storefront::AppState;
use clothkart_storefront::config::StorefrontConfig;
use clothkart_storefront::db::schema;

/// Admin token every test app is configured with.
///
/// Long and high-entropy, so the same value would also pass the startup
/// validation in [`StorefrontConfig::from_env`].
pub const TEST_ADMIN_TOKEN: &str = "kQ4vA9wL2xR7pF8dZ3tY6mC1hN5bJ0gE";

/// Configuration for a test app: in-memory database, no Sentry.
fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: "sqlite::memory:".to_string(),
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
        port: 0,
        admin_token: SecretString::from(TEST_ADMIN_TOKEN),
        cookie_secure: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A storefront instance backed by its own in-memory database.
pub struct TestApp {
    router: Router,
    /// Handle to the same database the app uses, for direct assertions.
    pub pool: SqlitePool,
}

impl TestApp {
    /// Build a fresh app: new in-memory database, schema created, router
    /// assembled with the full production middleware stack.
    pub async fn spawn() -> Self {
        // The single connection owns the in-memory database; pool reaping
        // would destroy it, so both timeouts are disabled.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        schema::init_schema(&pool)
            .await
            .expect("Failed to create schema");

        let state = AppState::new(test_config(), pool.clone());
        let router = clothkart_storefront::app(state)
            .await
            .expect("Failed to build router");

        Self { router, pool }
    }

    /// A client with no cookies yet.
    #[must_use]
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Register and log in a user, returning a client with a live session.
    pub async fn logged_in_client(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> TestClient {
        let mut client = self.client();

        let res = client
            .post_form(
                "/register",
                &[
                    ("username", username),
                    ("email", email),
                    ("password", password),
                ],
            )
            .await;
        assert_eq!(
            res.status(),
            StatusCode::SEE_OTHER,
            "registration should redirect"
        );

        let res = client
            .post_form("/login", &[("email", email), ("password", password)])
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "login should redirect");

        client
    }

    /// Count the rows in a table.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows")
    }

    /// Look up a user's id by email, for ownership assertions.
    pub async fn user_id(&self, email: &str) -> UserId {
        sqlx::query_scalar("SELECT id FROM users WHERE email = ?1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to look up user id")
    }
}

/// A cookie-carrying client for one [`TestApp`].
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> Response {
        let req = self
            .builder(Request::get(uri))
            .body(Body::empty())
            .expect("Failed to build GET request");
        self.send(req).await
    }

    /// Send a GET request with one extra header.
    pub async fn get_with_header(&mut self, uri: &str, name: &str, value: &str) -> Response {
        let req = self
            .builder(Request::get(uri).header(name, value))
            .body(Body::empty())
            .expect("Failed to build GET request");
        self.send(req).await
    }

    /// Submit form fields, like a browser form submission.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let req = self
            .builder(Request::post(uri).header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            ))
            .body(Body::from(form_body(fields)))
            .expect("Failed to build POST request");
        self.send(req).await
    }

    /// Submit form fields with one extra header (e.g. `Referer`).
    pub async fn post_form_with_header(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
        name: &str,
        value: &str,
    ) -> Response {
        let req = self
            .builder(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header(name, value),
            )
            .body(Body::from(form_body(fields)))
            .expect("Failed to build POST request");
        self.send(req).await
    }

    /// Attach the stored session cookie, if any.
    fn builder(&self, mut builder: request::Builder) -> request::Builder {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn send(&mut self, req: Request<Body>) -> Response {
        let res = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Request should not fail at the transport level");

        // Carry the session cookie forward, as a browser would
        for value in res.headers().get_all(header::SET_COOKIE) {
            if let Some(pair) = value.to_str().ok().and_then(|v| v.split(';').next()) {
                self.cookie = Some(pair.trim().to_string());
            }
        }

        res
    }
}

/// Read a response body to a string.
pub async fn body_string(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body should be UTF-8")
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(res: &Response) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Response should carry a Location header")
}

/// Encode form fields as `application/x-www-form-urlencoded`.
#[must_use]
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode one form key or value.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
