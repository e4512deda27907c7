//! User domain types.

use clothkart_core::{Email, UserId, Username};

/// A registered user (domain type).
///
/// The password hash never leaves [`crate::db::UserRepository`]; login code
/// receives it paired with the user, and nothing else sees it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name chosen at registration (unique).
    pub username: Username,
    /// User's email address (unique).
    pub email: Email,
}
