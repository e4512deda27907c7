//! Page route handlers.
//!
//! Renders the browsing pages: home, about, account, shop, and the
//! featured single-product page. The shop sells from the static catalog
//! in [`crate::content`]; the add-to-cart forms on these pages post the
//! name/price snapshot that ends up in the cart rows.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;
use tracing::instrument;

use crate::content::{CatalogItem, featured_item, shop_catalog};
use crate::filters;
use crate::middleware::{FlashMessage, OptionalAuth, take_flashes};
use crate::models::CurrentUser;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    /// Display price, e.g. `₹49.00`.
    pub price: String,
    /// Bare numeric price for the add-to-cart form's hidden field.
    pub price_input: String,
    /// Image path relative to the static root.
    pub image: String,
    pub description: String,
}

/// Format an amount as a display price.
fn format_price(amount: f64) -> String {
    format!("\u{20b9}{amount:.2}")
}

impl From<&CatalogItem> for ProductCardView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            name: item.name.to_string(),
            price: format_price(item.price),
            price_input: format!("{:.2}", item.price),
            image: item.image.to_string(),
            description: item.description.to_string(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub flashes: Vec<FlashMessage>,
    pub featured: Vec<ProductCardView>,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub flashes: Vec<FlashMessage>,
}

/// Account page template: greeting when logged in, forms when not.
#[derive(Template, WebTemplate)]
#[template(path = "account.html")]
pub struct AccountTemplate {
    pub flashes: Vec<FlashMessage>,
    pub user: Option<CurrentUser>,
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub flashes: Vec<FlashMessage>,
    pub products: Vec<ProductCardView>,
}

/// Single-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "sproduct.html")]
pub struct SproductTemplate {
    pub flashes: Vec<FlashMessage>,
    pub product: ProductCardView,
}

/// Display the home page.
#[instrument(skip(session))]
pub async fn home(session: Session) -> HomeTemplate {
    HomeTemplate {
        flashes: take_flashes(&session).await,
        featured: shop_catalog().iter().map(ProductCardView::from).collect(),
    }
}

/// Display the about page.
#[instrument(skip(session))]
pub async fn about(session: Session) -> AboutTemplate {
    AboutTemplate {
        flashes: take_flashes(&session).await,
    }
}

/// Display the account page.
///
/// Shows a greeting and logout link for a logged-in user, or the login
/// and registration forms otherwise.
#[instrument(skip(session, user))]
pub async fn account(session: Session, OptionalAuth(user): OptionalAuth) -> AccountTemplate {
    AccountTemplate {
        flashes: take_flashes(&session).await,
        user,
    }
}

/// Display the shop page with the static catalog.
#[instrument(skip(session))]
pub async fn shop(session: Session) -> ShopTemplate {
    ShopTemplate {
        flashes: take_flashes(&session).await,
        products: shop_catalog().iter().map(ProductCardView::from).collect(),
    }
}

/// Display the featured single-product page.
#[instrument(skip(session))]
pub async fn sproduct(session: Session) -> SproductTemplate {
    SproductTemplate {
        flashes: take_flashes(&session).await,
        product: ProductCardView::from(featured_item()),
    }
}
