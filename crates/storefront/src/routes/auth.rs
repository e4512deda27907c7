//! Authentication route handlers.
//!
//! Handles registration, login, and logout. Every outcome lands back on
//! the account page with a flash message; only unexpected database or
//! hashing failures surface as error responses.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{FlashLevel, clear_current_user, flash, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Handle registration form submission.
///
/// On success the user is created but not logged in; they log in from
/// the same page afterwards.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim();
    let email = form.email.trim();

    if username.is_empty() || email.is_empty() || form.password.is_empty() {
        flash(&session, FlashLevel::Warning, "Please fill in all fields.").await;
        return Ok(Redirect::to("/account").into_response());
    }

    let auth = AuthService::new(state.pool());
    match auth.register(username, email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "New user registered");
            flash(
                &session,
                FlashLevel::Success,
                "Registration successful. Please log in.",
            )
            .await;
        }
        Err(AuthError::UserAlreadyExists) => {
            flash(
                &session,
                FlashLevel::Error,
                "Username or email already exists.",
            )
            .await;
        }
        Err(AuthError::InvalidEmail(_)) => {
            flash(
                &session,
                FlashLevel::Error,
                "Please enter a valid email address.",
            )
            .await;
        }
        Err(AuthError::InvalidUsername(_)) => {
            flash(&session, FlashLevel::Error, "Please enter a valid username.").await;
        }
        Err(AuthError::WeakPassword(_)) => {
            flash(
                &session,
                FlashLevel::Error,
                "Password must be at least 8 characters.",
            )
            .await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/account").into_response())
}

/// Handle login form submission.
///
/// On success the user's identity goes into the session; unknown email
/// and wrong password produce the same message.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim();

    if email.is_empty() || form.password.is_empty() {
        flash(&session, FlashLevel::Warning, "Please fill in all fields.").await;
        return Ok(Redirect::to("/account").into_response());
    }

    let auth = AuthService::new(state.pool());
    match auth.login(email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                username: user.username.clone(),
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {e}");
                return Err(AppError::Internal("session store failed".to_string()));
            }

            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "User logged in");
            flash(
                &session,
                FlashLevel::Success,
                format!("Welcome back, {}!", user.username),
            )
            .await;
        }
        Err(AuthError::InvalidCredentials) => {
            flash(&session, FlashLevel::Error, "Invalid email or password.").await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/account").into_response())
}

/// Handle logout.
///
/// Removes the user from the session but keeps the session itself, so
/// the goodbye flash survives the redirect.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session user: {e}");
    }
    clear_sentry_user();

    flash(&session, FlashLevel::Info, "Logged out successfully.").await;
    Redirect::to("/account").into_response()
}
