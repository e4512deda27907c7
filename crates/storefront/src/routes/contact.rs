//! Contact form route handlers.
//!
//! Stores submissions in the `contact_messages` table; they are only
//! ever read back through the admin dump.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use clothkart_core::Email;

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{FlashLevel, FlashMessage, flash, take_flashes};
use crate::state::AppState;

/// Contact form data.
///
/// `subject` is the one optional field.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub flashes: Vec<FlashMessage>,
}

/// Display the contact form.
#[instrument(skip(session))]
pub async fn page(session: Session) -> ContactTemplate {
    ContactTemplate {
        flashes: take_flashes(&session).await,
    }
}

/// Handle a contact form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let name = form.name.trim();
    let message = form.message.trim();

    if name.is_empty() || form.email.trim().is_empty() || message.is_empty() {
        flash(
            &session,
            FlashLevel::Warning,
            "Please fill in all required fields.",
        )
        .await;
        return Ok(Redirect::to("/contact").into_response());
    }

    let Ok(email) = Email::parse(form.email.trim()) else {
        flash(
            &session,
            FlashLevel::Error,
            "Please enter a valid email address.",
        )
        .await;
        return Ok(Redirect::to("/contact").into_response());
    };

    let subject = form.subject.as_deref().unwrap_or("").trim();
    let message_row = ContactRepository::new(state.pool())
        .create(name, &email, subject, message)
        .await?;

    tracing::info!(contact_message_id = %message_row.id, "Contact message stored");
    flash(
        &session,
        FlashLevel::Success,
        "Your message has been sent.",
    )
    .await;
    Ok(Redirect::to("/contact").into_response())
}
