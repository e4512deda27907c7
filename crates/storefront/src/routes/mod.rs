//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /about                   - About page
//! GET  /account                 - Account page (login/register forms, greeting)
//! GET  /shop                    - Shop page (static catalog)
//! GET  /sproduct                - Featured single-product page
//!
//! # Auth (rate limited)
//! POST /register                - Create an account
//! POST /login                   - Log in
//! GET  /logout                  - Log out
//!
//! # Cart (requires login)
//! POST /add_to_cart             - Add an item snapshot to the cart
//! GET  /cart                    - Cart page with running total
//! GET  /remove_from_cart/{id}   - Remove one owned cart row
//!
//! # Forms
//! GET  /contact                 - Contact form
//! POST /contact                 - Submit a contact message
//! POST /subscribe               - Newsletter signup (redirects to referrer)
//!
//! # Admin (requires ADMIN_TOKEN)
//! GET  /initdb                  - Drop, recreate, and seed all tables
//! GET  /showdata                - HTML dump of every table
//!
//! # Operations
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod contact;
pub mod health;
pub mod newsletter;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
///
/// Register and login sit behind the rate limiter; logout does not need
/// one.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter())
        .route("/logout", get(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add_to_cart", post(cart::add))
        .route("/cart", get(cart::show))
        .route("/remove_from_cart/{id}", get(cart::remove))
}

/// Create the admin routes router.
///
/// Every handler here demands the admin token via its extractor.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/initdb", get(admin::initdb))
        .route("/showdata", get(admin::showdata))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/account", get(pages::account))
        .route("/shop", get(pages::shop))
        .route("/sproduct", get(pages::sproduct))
        // Auth
        .merge(auth_routes())
        // Cart
        .merge(cart_routes())
        // Contact form
        .route("/contact", get(contact::page).post(contact::submit))
        // Newsletter signup
        .route("/subscribe", post(newsletter::subscribe))
        // Admin maintenance
        .merge(admin_routes())
        // Operations
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}
