//! SQL DDL for initializing the database (`SQLite`-first).
//!
//! Statements are executed one at a time; order matters for the drop list
//! because `cart_items` references `users`.

use sqlx::SqlitePool;

use super::RepositoryError;

/// Idempotent table creation, run at startup and after a reset.
const CREATE_TABLES: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        description TEXT NOT NULL,
        image TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS cart_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_name TEXT NOT NULL,
        price REAL NOT NULL,
        quantity INTEGER NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users(id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS contact_messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL DEFAULT '',
        message TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS subscribers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE
    )
    ",
];

/// Tables dropped by the admin reset, children before parents.
const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS cart_items",
    "DROP TABLE IF EXISTS subscribers",
    "DROP TABLE IF EXISTS contact_messages",
    "DROP TABLE IF EXISTS products",
    "DROP TABLE IF EXISTS users",
];

/// Sample products inserted by the admin reset: (name, price, description, image).
const SEED_PRODUCTS: &[(&str, f64, &str, &str)] = &[
    ("Red Dress", 799.0, "Stylish red dress", "img/product1.jpg"),
    ("Blue Jeans", 1199.0, "Comfortable blue jeans", "img/product2.jpg"),
    ("White Shirt", 699.0, "Cotton casual shirt", "img/product3.jpg"),
];

/// Create all tables if they do not exist yet.
///
/// Safe to run on every startup.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Drop every table, recreate the schema, and insert the sample products.
///
/// This is the destructive reset behind the admin `/initdb` endpoint.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
pub async fn reset_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    for statement in DROP_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    init_schema(pool).await?;
    seed_products(pool).await
}

/// Insert the sample product rows.
async fn seed_products(pool: &SqlitePool) -> Result<(), RepositoryError> {
    for (name, price, description, image) in SEED_PRODUCTS {
        sqlx::query(
            r"
            INSERT INTO products (name, price, description, image)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(image)
        .execute(pool)
        .await?;
    }
    Ok(())
}
