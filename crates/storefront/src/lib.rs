//! ClothKart storefront library.
//!
//! The whole web application lives here as a library: configuration,
//! persistence, middleware, routes, and the assembled [`app`] router.
//! The binary in `main.rs` and the integration-test crate both go
//! through [`app`], so tests drive exactly the router that serves
//! production traffic (minus the Sentry layers, which the binary adds
//! on the outside).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub use state::AppState;

/// Build the complete storefront router.
///
/// Assembles the routes plus the middleware stack described in
/// [`middleware`]: rate limiting sits inside the auth sub-router,
/// security headers and the session layer wrap every route, and request
/// IDs and the HTTP trace span wrap those. Static assets are served
/// from the crate's `static/` directory.
///
/// The session store's backing table is created here if missing.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn app(state: AppState) -> Result<Router, sqlx::Error> {
    let session_layer = middleware::create_session_layer(state.pool(), state.config()).await?;

    Ok(Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state))
}
