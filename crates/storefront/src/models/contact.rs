//! Contact form domain types.

use clothkart_core::{ContactMessageId, Email};

/// A message left through the contact form.
///
/// Never read by the application except for the admin dump.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactMessage {
    /// Unique message ID.
    pub id: ContactMessageId,
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: Email,
    /// Optional subject line (empty string when omitted).
    pub subject: String,
    /// Message body.
    pub message: String,
}
