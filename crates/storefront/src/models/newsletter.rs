//! Newsletter domain types.

use clothkart_core::{Email, SubscriberId};

/// A newsletter subscriber.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subscriber {
    /// Unique subscriber ID.
    pub id: SubscriberId,
    /// Subscriber's email address (unique).
    pub email: Email,
}
