//! Cart domain types.

use clothkart_core::{CartItemId, UserId};

/// A single line item in a user's cart.
///
/// Name and price are snapshots taken when the item was added; later catalog
/// changes do not propagate to existing rows.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItem {
    /// Unique cart row ID.
    pub id: CartItemId,
    /// Product name at add time.
    pub product_name: String,
    /// Unit price at add time.
    pub price: f64,
    /// Number of units.
    pub quantity: i64,
    /// Owning user.
    pub user_id: UserId,
}

impl CartItem {
    /// Price times quantity for this row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Quantities are small form inputs
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let item = CartItem {
            id: CartItemId::new(1),
            product_name: "Red Dress".to_string(),
            price: 799.0,
            quantity: 2,
            user_id: UserId::new(1),
        };
        assert!((item.subtotal() - 1598.0).abs() < f64::EPSILON);
    }
}
