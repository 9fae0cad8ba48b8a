//! Notification sender contract.
//!
//! The core constructs the account-setup URL and hands it to a
//! [`NotificationSender`]; how the message actually reaches the invitee is
//! an embedder concern. Delivery failure is surfaced to the issuer as a
//! hard failure of `issue` - see
//! [`InvitationLedger::issue`](crate::InvitationLedger::issue) for the
//! withdrawal policy.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// A failed notification delivery.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct NotificationError {
    /// Human-readable delivery failure reason.
    pub message: String,
}

impl NotificationError {
    /// Creates a delivery error with the given reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Delivers account-setup links to invitees.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Sends the setup link to the recipient.
    ///
    /// # Errors
    ///
    /// Returns a [`NotificationError`] when delivery failed; the caller
    /// treats this as a hard failure of the surrounding operation.
    async fn send(&self, recipient: &str, setup_url: &str) -> Result<(), NotificationError>;
}

/// A sender that records deliveries in the log and always succeeds.
///
/// Useful for development and for embeddings where a real mailer is wired
/// in at the boundary instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSender;

#[async_trait]
impl NotificationSender for TracingSender {
    async fn send(&self, recipient: &str, setup_url: &str) -> Result<(), NotificationError> {
        info!(recipient = %recipient, setup_url = %setup_url, "Invitation notification dispatched");
        Ok(())
    }
}
