//! Newsletter subscription route handlers.
//!
//! The subscribe form lives in the footer of every page, so a submission
//! redirects back to wherever it came from (the `Referer` header),
//! falling back to the home page.

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::REFERER},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use clothkart_core::Email;

use crate::db::{NewsletterRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::{FlashLevel, flash};
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Extract a same-site redirect target from the `Referer` header.
///
/// Only the path (and query) of the referrer is used, never its origin,
/// so a forged header cannot redirect the user off-site.
fn referer_path(headers: &HeaderMap) -> String {
    let Some(referer) = headers.get(REFERER).and_then(|v| v.to_str().ok()) else {
        return "/".to_string();
    };

    if let Some(rest) = referer.split("://").nth(1) {
        // Absolute URL: keep everything from the first slash after the host
        return rest
            .find('/')
            .map_or_else(|| "/".to_string(), |i| rest[i..].to_string());
    }

    if referer.starts_with('/') && !referer.starts_with("//") {
        return referer.to_string();
    }

    "/".to_string()
}

/// Handle a newsletter signup.
///
/// Duplicate emails are reported, not stored twice.
#[instrument(skip(state, session, headers, form), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<SubscribeForm>,
) -> Result<Response, AppError> {
    let target = referer_path(&headers);
    let normalized = form.email.trim().to_lowercase();

    // The parse handles shape; the dot check filters TLD-less domains the
    // form widget lets through
    let email = match Email::parse(&normalized) {
        Ok(email) if email.domain().contains('.') => email,
        _ => {
            flash(
                &session,
                FlashLevel::Error,
                "Please enter a valid email address.",
            )
            .await;
            return Ok(Redirect::to(&target).into_response());
        }
    };

    match NewsletterRepository::new(state.pool()).subscribe(&email).await {
        Ok(subscriber) => {
            tracing::info!(subscriber_id = %subscriber.id, "Newsletter subscription stored");
            flash(&session, FlashLevel::Success, "Subscribed successfully.").await;
        }
        Err(RepositoryError::Conflict(_)) => {
            flash(&session, FlashLevel::Info, "You are already subscribed.").await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to(&target).into_response())
}
