//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `SQLite` store)
//! 5. Security headers (CSP, isolation, cache control)
//! 6. Rate limiting (governor, auth endpoints only)

pub mod admin;
pub mod auth;
pub mod flash;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use admin::RequireAdminToken;
pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use flash::{FlashLevel, FlashMessage, flash, take_flashes};
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
