//! Cart repository for database operations.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use clothkart_core::{CartItemId, UserId, Username};

use super::RepositoryError;
use crate::models::CartItem;

/// A cart row joined with its owner's username, for the admin dump.
///
/// `username` is `None` when the owning user row no longer exists.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItemWithOwner {
    /// Unique cart row ID.
    pub id: CartItemId,
    /// Product name at add time.
    pub product_name: String,
    /// Unit price at add time.
    pub price: f64,
    /// Number of units.
    pub quantity: i64,
    /// Owner's username, if the user still exists.
    pub username: Option<Username>,
}

impl CartItemWithOwner {
    /// Price times quantity for this row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Quantities are small form inputs
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a cart row with a name/price snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        user_id: UserId,
        product_name: &str,
        price: f64,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            INSERT INTO cart_items (product_name, price, quantity, user_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, product_name, price, quantity, user_id
            ",
        )
        .bind(product_name)
        .bind(price)
        .bind(quantity)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        debug!(cart_item_id = %item.id, "Added cart item");
        Ok(item)
    }

    /// All cart rows belonging to one user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(
            r"
            SELECT id, product_name, price, quantity, user_id
            FROM cart_items
            WHERE user_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Delete a cart row owned by the given user.
    ///
    /// The `user_id` filter means another user's row id behaves exactly like
    /// a nonexistent id.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: CartItemId, user_id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Every cart row joined with its owner, for the admin dump.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all_with_owner(&self) -> Result<Vec<CartItemWithOwner>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemWithOwner>(
            r"
            SELECT c.id, c.product_name, c.price, c.quantity, u.username
            FROM cart_items c
            LEFT JOIN users u ON u.id = c.user_id
            ORDER BY c.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
