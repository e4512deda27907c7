//! Contact message repository for database operations.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use clothkart_core::Email;

use super::RepositoryError;
use crate::models::ContactMessage;

/// Repository for contact form database operations.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a contact form submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, message))]
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        subject: &str,
        message: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        let stored = sqlx::query_as::<_, ContactMessage>(
            r"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, subject, message
            ",
        )
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        debug!(contact_id = %stored.id, "Stored contact message");
        Ok(stored)
    }

    /// List every contact message, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r"
            SELECT id, name, email, subject, message
            FROM contact_messages
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }
}
