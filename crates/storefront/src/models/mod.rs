//! Domain models for the storefront.
//!
//! One module per table. The structs derive `sqlx::FromRow` because every
//! query in [`crate::db`] is runtime-checked.

pub mod cart;
pub mod contact;
pub mod newsletter;
pub mod product;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use contact::ContactMessage;
pub use newsletter::Subscriber;
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
