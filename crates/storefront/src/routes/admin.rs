//! Admin maintenance route handlers.
//!
//! `/initdb` drops, recreates, and seeds the schema; `/showdata` renders
//! every table as an HTML dashboard. Both require the admin token (see
//! [`crate::middleware::admin`]); neither is linked from any page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{
    CartRepository, ContactRepository, NewsletterRepository, ProductRepository, UserRepository,
    schema,
};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{FlashLevel, FlashMessage, RequireAdminToken, flash, take_flashes};
use crate::state::AppState;

/// Format an amount as a display price.
fn format_price(amount: f64) -> String {
    format!("\u{20b9}{amount:.2}")
}

/// User table row for the dashboard. Never includes the password hash.
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Product table row for the dashboard.
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub description: String,
}

/// Cart table row for the dashboard, joined with its owner.
pub struct CartRow {
    pub id: i64,
    pub username: String,
    pub product_name: String,
    pub price: String,
    pub quantity: i64,
    pub subtotal: String,
}

/// Contact message row for the dashboard.
pub struct ContactRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Subscriber row for the dashboard.
pub struct SubscriberRow {
    pub id: i64,
    pub email: String,
}

/// Database dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/showdata.html")]
pub struct ShowDataTemplate {
    pub flashes: Vec<FlashMessage>,
    pub users: Vec<UserRow>,
    pub products: Vec<ProductRow>,
    pub cart_items: Vec<CartRow>,
    pub contacts: Vec<ContactRow>,
    pub subscribers: Vec<SubscriberRow>,
}

/// Drop, recreate, and seed the database.
///
/// Existing sessions survive (the session table is left alone), but any
/// user rows they referenced are gone, so they degrade to logged-out.
#[instrument(skip(state, _admin, session))]
pub async fn initdb(
    State(state): State<AppState>,
    _admin: RequireAdminToken,
    session: Session,
) -> Result<Response, AppError> {
    schema::reset_schema(state.pool()).await?;
    tracing::info!("Database reset with sample products");

    flash(
        &session,
        FlashLevel::Success,
        "Database initialized with sample products.",
    )
    .await;
    Ok(Redirect::to("/").into_response())
}

/// Render every table as an HTML dashboard.
#[instrument(skip(state, _admin, session))]
pub async fn showdata(
    State(state): State<AppState>,
    _admin: RequireAdminToken,
    session: Session,
) -> Result<ShowDataTemplate, AppError> {
    let pool = state.pool();

    let users = UserRepository::new(pool)
        .all()
        .await?
        .into_iter()
        .map(|u| UserRow {
            id: u.id.as_i64(),
            username: u.username.to_string(),
            email: u.email.to_string(),
        })
        .collect();

    let products = ProductRepository::new(pool)
        .all()
        .await?
        .into_iter()
        .map(|p| ProductRow {
            id: p.id.as_i64(),
            name: p.name,
            price: format_price(p.price),
            description: p.description,
        })
        .collect();

    let cart_items = CartRepository::new(pool)
        .all_with_owner()
        .await?
        .into_iter()
        .map(|c| CartRow {
            id: c.id.as_i64(),
            username: c
                .username
                .as_ref()
                .map_or_else(|| "Guest".to_string(), ToString::to_string),
            subtotal: format_price(c.subtotal()),
            product_name: c.product_name,
            price: format_price(c.price),
            quantity: c.quantity,
        })
        .collect();

    let contacts = ContactRepository::new(pool)
        .all()
        .await?
        .into_iter()
        .map(|m| ContactRow {
            id: m.id.as_i64(),
            name: m.name,
            email: m.email.to_string(),
            subject: m.subject,
            message: m.message,
        })
        .collect();

    let subscribers = NewsletterRepository::new(pool)
        .all()
        .await?
        .into_iter()
        .map(|s| SubscriberRow {
            id: s.id.as_i64(),
            email: s.email.to_string(),
        })
        .collect();

    Ok(ShowDataTemplate {
        flashes: take_flashes(&session).await,
        users,
        products,
        cart_items,
        contacts,
        subscribers,
    })
}
