//! Product domain types.

use clothkart_core::ProductId;

/// A catalog product stored in the database.
///
/// Rows are written only by the admin reset; everything else reads them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price in rupees.
    pub price: f64,
    /// Short marketing description.
    pub description: String,
    /// Image path relative to the static root (e.g., `img/product1.jpg`).
    pub image: String,
}
