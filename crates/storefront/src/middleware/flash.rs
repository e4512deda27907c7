//! One-shot flash messages stored in the session.
//!
//! Handlers push a message before redirecting; the next rendered page
//! drains the queue and shows each message once as a dismissible banner.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity of a flash message, used as the banner's CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Success,
    Info,
    Warning,
}

impl FlashLevel {
    /// CSS class suffix for the banner.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// A single queued flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a flash message for the next rendered page.
///
/// A flash that fails to store only costs the user a banner, so storage
/// errors are logged rather than failing the request.
pub async fn flash(session: &Session, level: FlashLevel, message: impl Into<String>) {
    let entry = FlashMessage {
        level,
        message: message.into(),
    };

    let mut pending: Vec<FlashMessage> = session
        .get(session_keys::FLASH_MESSAGES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(entry);

    if let Err(e) = session.insert(session_keys::FLASH_MESSAGES, pending).await {
        tracing::warn!("Failed to store flash message: {e}");
    }
}

/// Drain all pending flash messages.
///
/// Returns an empty list when there are none or the session is unreadable.
pub async fn take_flashes(session: &Session) -> Vec<FlashMessage> {
    match session
        .remove::<Vec<FlashMessage>>(session_keys::FLASH_MESSAGES)
        .await
    {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to drain flash messages: {e}");
            Vec::new()
        }
    }
}
