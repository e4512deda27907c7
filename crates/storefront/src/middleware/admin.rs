//! Admin token guard for the database maintenance endpoints.
//!
//! `/initdb` and `/showdata` are operator tools, not user-facing pages.
//! They require the `ADMIN_TOKEN` configured at startup, supplied either
//! as a bearer header or a `token` query parameter:
//!
//! ```text
//! curl -H "Authorization: Bearer $ADMIN_TOKEN" http://localhost:3000/showdata
//! curl "http://localhost:3000/initdb?token=$ADMIN_TOKEN"
//! ```

use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::state::AppState;

/// Extractor that requires a valid admin token.
///
/// Rejects with 401 Unauthorized when the token is absent or wrong. The
/// response body never distinguishes the two cases.
pub struct RequireAdminToken;

/// Rejection for a missing or invalid admin token.
pub struct AdminTokenRejection;

impl IntoResponse for AdminTokenRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Pull the token from the `Authorization: Bearer` header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

impl FromRequestParts<AppState> for RequireAdminToken {
    type Rejection = AdminTokenRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = match bearer_token(parts) {
            Some(token) => Some(token.to_string()),
            None => Query::<TokenQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(q)| q.token),
        };

        let Some(provided) = provided else {
            tracing::warn!(path = %parts.uri.path(), "Admin endpoint called without token");
            return Err(AdminTokenRejection);
        };

        if provided == state.config().admin_token.expose_secret() {
            Ok(Self)
        } else {
            tracing::warn!(path = %parts.uri.path(), "Admin endpoint called with invalid token");
            Err(AdminTokenRejection)
        }
    }
}
