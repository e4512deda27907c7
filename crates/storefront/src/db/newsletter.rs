//! Newsletter subscriber repository for database operations.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use clothkart_core::Email;

use super::RepositoryError;
use crate::models::Subscriber;

/// Repository for newsletter database operations.
pub struct NewsletterRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NewsletterRepository<'a> {
    /// Create a new newsletter repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a subscriber.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// subscribed.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, email: &Email) -> Result<Subscriber, RepositoryError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            r"
            INSERT INTO subscribers (email)
            VALUES (?1)
            RETURNING id, email
            ",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already subscribed".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        debug!(subscriber_id = %subscriber.id, "Added subscriber");
        Ok(subscriber)
    }

    /// List every subscriber, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            r"
            SELECT id, email
            FROM subscribers
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(subscribers)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::db::schema;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        schema::init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_subscribe_rejects_duplicates() {
        let pool = test_pool().await;
        let repo = NewsletterRepository::new(&pool);
        let email = Email::parse("news@x.com").unwrap();

        repo.subscribe(&email).await.unwrap();

        let err = repo.subscribe(&email).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        assert_eq!(repo.all().await.unwrap().len(), 1);
    }
}
