//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in user in route handlers.
//! Both extractors re-check the session's user id against the database,
//! so a session that outlives its user row (e.g. after a database reset)
//! degrades to logged-out instead of inserting orphan cart rows.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::middleware::flash::{FlashLevel, flash};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in (or the session's user no longer exists),
/// queues a warning flash and redirects to the account page, where the
/// login and registration forms live.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is logged in.
pub enum AuthRejection {
    /// Redirect to the account page (login/register forms).
    RedirectToAccount,
    /// Unauthorized response (session layer missing).
    Unauthorized,
    /// The user lookup failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToAccount => Redirect::to("/account").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again later.",
            )
                .into_response(),
        }
    }
}

/// Load the session's user and confirm the row still exists.
///
/// Returns the database-fresh identity, `Ok(None)` when nobody is logged
/// in or the row is gone (the stale session key is cleared on the way).
async fn verify_session_user(
    session: &Session,
    state: &AppState,
) -> Result<Option<CurrentUser>, crate::db::RepositoryError> {
    let Some(claimed) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
    else {
        return Ok(None);
    };

    match UserRepository::new(state.pool()).get_by_id(claimed.id).await? {
        Some(user) => Ok(Some(CurrentUser {
            id: user.id,
            username: user.username,
        })),
        None => {
            tracing::debug!(user_id = %claimed.id, "Session user no longer exists, clearing");
            if let Err(e) = session
                .remove::<CurrentUser>(session_keys::CURRENT_USER)
                .await
            {
                tracing::warn!("Failed to clear stale session user: {e}");
            }
            Ok(None)
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?
            .clone();

        match verify_session_user(&session, state).await {
            Ok(Some(user)) => Ok(Self(user)),
            Ok(None) => {
                flash(&session, FlashLevel::Warning, "Please log in first.").await;
                Err(AuthRejection::RedirectToAccount)
            }
            Err(e) => {
                tracing::error!("Failed to verify session user: {e}");
                Err(AuthRejection::Internal)
            }
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in. Lookup failures also resolve to `None`; a browsing page is
/// never worth failing over a degraded user lookup.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     OptionalAuth(user): OptionalAuth,
/// ) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.username),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>().cloned() else {
            return Ok(Self(None));
        };

        let user = match verify_session_user(&session, state).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to verify session user: {e}");
                None
            }
        };

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
