//! User repository for database operations.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use clothkart_core::{Email, UserId, Username};

use super::RepositoryError;
use crate::models::User;

/// Row carrying the password hash next to the user columns.
///
/// Only [`UserRepository::get_password_hash`] reads this; the hash stays out
/// of the [`User`] domain type.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user with a username, email, and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is
    /// already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, password_hash))]
    pub async fn create_with_password(
        &self,
        username: &Username,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (username, email, password_hash)
            VALUES (?1, ?2, ?3)
            RETURNING id, username, email
            ",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username or email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    /// Get a user's password hash by email.
    ///
    /// Returns `None` if no user has that email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(
            r"
            SELECT id, username, email, password_hash
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            (
                User {
                    id: r.id,
                    username: r.username,
                    email: r.email,
                },
                r.password_hash,
            )
        }))
    }

    /// List every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email
            FROM users
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
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

    fn username(s: &str) -> Username {
        Username::parse(s).unwrap()
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo
            .create_with_password(&username("ann"), &email("a@x.com"), "hash")
            .await
            .unwrap();

        let by_email = repo.get_by_email(&email("a@x.com")).await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.username.as_str(), "ann");

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create_with_password(&username("ann"), &email("a@x.com"), "h1")
            .await
            .unwrap();

        let err = repo
            .create_with_password(&username("ann2"), &email("a@x.com"), "h2")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // No second row was created
        let users = repo.all().await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create_with_password(&username("ann"), &email("a@x.com"), "h1")
            .await
            .unwrap();

        let err = repo
            .create_with_password(&username("ann"), &email("b@x.com"), "h2")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_password_hash() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create_with_password(&username("ann"), &email("a@x.com"), "argon2-hash")
            .await
            .unwrap();

        let (user, hash) = repo
            .get_password_hash(&email("a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username.as_str(), "ann");
        assert_eq!(hash, "argon2-hash");

        assert!(
            repo.get_password_hash(&email("missing@x.com"))
                .await
                .unwrap()
                .is_none()
        );
    }
}
