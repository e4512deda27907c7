//! Cart route handlers.
//!
//! The cart stores a denormalized snapshot of name/price/quantity per
//! row, posted by the shop forms. Later catalog price changes never
//! touch existing rows. Every handler requires a logged-in user; the
//! remove operation is additionally scoped to the rows that user owns.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use clothkart_core::CartItemId;

use crate::db::CartRepository;
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::{FlashLevel, FlashMessage, RequireAuth, flash, take_flashes};
use crate::models::CartItem;
use crate::state::AppState;

/// Cart row display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub product_name: String,
    pub price: String,
    pub quantity: i64,
    pub subtotal: String,
}

/// Format an amount as a display price.
fn format_price(amount: f64) -> String {
    format!("\u{20b9}{amount:.2}")
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_i64(),
            product_name: item.product_name.clone(),
            price: format_price(item.price),
            quantity: item.quantity,
            subtotal: format_price(item.subtotal()),
        }
    }
}

/// Add to cart form data.
///
/// `quantity` defaults to 1 when the form omits it.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_name: String,
    pub price: f64,
    pub quantity: Option<i64>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub flashes: Vec<FlashMessage>,
    pub items: Vec<CartItemView>,
    pub total: String,
}

/// Add an item to the cart.
///
/// Inserts a snapshot row from the posted form fields and redirects to
/// the cart page.
#[instrument(skip(state, session, user, form), fields(user_id = %user.0.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    user: RequireAuth,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let RequireAuth(user) = user;
    let product_name = form.product_name.trim();
    let quantity = form.quantity.unwrap_or(1).max(1);

    if product_name.is_empty() || !form.price.is_finite() || form.price < 0.0 {
        flash(&session, FlashLevel::Warning, "Invalid product data.").await;
        return Ok(Redirect::to("/shop").into_response());
    }

    let item = CartRepository::new(state.pool())
        .add(user.id, product_name, form.price, quantity)
        .await?;

    add_breadcrumb(
        "cart",
        "Item added to cart",
        Some(&[("product", product_name)]),
    );
    tracing::debug!(cart_item_id = %item.id, "Cart item added");

    flash(&session, FlashLevel::Success, "Item added to cart.").await;
    Ok(Redirect::to("/cart").into_response())
}

/// Display the cart page with the user's rows and running total.
#[instrument(skip(state, session, user), fields(user_id = %user.0.id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    user: RequireAuth,
) -> Result<CartTemplate, AppError> {
    let RequireAuth(user) = user;
    let items = CartRepository::new(state.pool()).for_user(user.id).await?;

    let total: f64 = items.iter().map(CartItem::subtotal).sum();

    Ok(CartTemplate {
        flashes: take_flashes(&session).await,
        items: items.iter().map(CartItemView::from).collect(),
        total: format_price(total),
    })
}

/// Remove one cart row owned by the current user.
///
/// A row id belonging to another user behaves exactly like a nonexistent
/// id: nothing is deleted and no flash is shown.
#[instrument(skip(state, session, user), fields(user_id = %user.0.id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    user: RequireAuth,
    Path(id): Path<CartItemId>,
) -> Result<Response, AppError> {
    let RequireAuth(user) = user;
    let removed = CartRepository::new(state.pool())
        .remove(id, user.id)
        .await?;

    if removed {
        add_breadcrumb("cart", "Item removed from cart", None);
        flash(&session, FlashLevel::Info, "Item removed from cart.").await;
    } else {
        tracing::debug!(cart_item_id = %id, "Remove matched no owned row");
    }

    Ok(Redirect::to("/cart").into_response())
}
