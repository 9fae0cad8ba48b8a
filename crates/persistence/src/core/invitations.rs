//! Invitation storage trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use medivault_model::{Invitation, InviteToken};

use crate::error::StorageResult;

/// Storage for invitations.
///
/// The token is unique among all ever-issued tokens and immutable once
/// issued. The single mutation is [`consume`](Self::consume): an atomic
/// PENDING→USED compare-and-swap. This is the system's one mandatory
/// mutual-exclusion point - of any number of concurrent consume calls on
/// the same token, exactly one succeeds and the rest observe
/// `InvitationNotPending`.
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Inserts a freshly issued invitation.
    ///
    /// # Errors
    ///
    /// * `StorageError::Constraint(TokenExists)` - if the token was already
    ///   issued (vanishingly unlikely with 122-bit random tokens, but the
    ///   constraint is enforced regardless)
    async fn insert_invitation(&self, invitation: Invitation) -> StorageResult<Invitation>;

    /// Reads an invitation by token. Returns `None` when absent.
    ///
    /// Read-only: never mutates status, including for expired invitations.
    async fn invitation(&self, token: InviteToken) -> StorageResult<Option<Invitation>>;

    /// Atomically transitions the invitation from PENDING to USED.
    ///
    /// The precondition is evaluated against the stored row at commit time:
    /// status must be `Pending` and the expiry, when set, must lie after
    /// `now`. An expired invitation is rejected here even though its stored
    /// status field still reads `Pending`.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound(Invitation)` - if no invitation carries
    ///   the token
    /// * `StorageError::Precondition(InvitationNotPending)` - if the
    ///   invitation was already used, lost the race to a concurrent
    ///   consume, or is past its expiry
    async fn consume(&self, token: InviteToken, now: DateTime<Utc>) -> StorageResult<Invitation>;

    /// Deletes an invitation outright.
    ///
    /// Used by the issue path to withdraw an invitation whose notification
    /// could not be delivered. Deleting an absent token is an error - the
    /// issue path only ever deletes what it just inserted.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound(Invitation)` - if no invitation carries
    ///   the token
    async fn delete_invitation(&self, token: InviteToken) -> StorageResult<()>;
}
