//! Invitation ledger: issue, peek, consume.

use std::sync::Arc;

use chrono::TimeDelta;
use tracing::{info, warn};

use medivault_model::{Invitation, InvitationPreview, InvitationStatus, InviteToken, OnboardingPayload, Role};
use medivault_persistence::core::InvitationStore;

use crate::clock::Clock;
use crate::config::ServiceConfig;
use crate::error::{CoreError, CoreResult};
use crate::notify::NotificationSender;
use crate::scope::{self, Actor};

/// Owns the invitation state machine: issue → pending → used/expired.
///
/// Issuing authority follows [`scope::may_invite`]: admins invite every
/// role, doctors invite patients only. A doctor-issued patient invitation
/// is stamped with the issuing doctor's id so the eventual patient is
/// pre-assigned.
///
/// # Notification Policy
///
/// `issue` persists the invitation, then hands the setup link to the
/// notification sender. When delivery fails, the just-persisted invitation
/// is deleted and the issuer receives
/// [`CoreError::NotificationFailed`] - a PENDING invitation never exists
/// for an invitee who was not notified.
pub struct InvitationLedger<S, N, C> {
    store: Arc<S>,
    notifier: Arc<N>,
    clock: C,
    config: Arc<ServiceConfig>,
}

impl<S, N, C> InvitationLedger<S, N, C>
where
    S: InvitationStore,
    N: NotificationSender,
    C: Clock,
{
    /// Creates a ledger over the given collaborators.
    pub fn new(store: Arc<S>, notifier: Arc<N>, clock: C, config: Arc<ServiceConfig>) -> Self {
        Self {
            store,
            notifier,
            clock,
            config,
        }
    }

    /// Issues an invitation and notifies the invitee.
    ///
    /// The token is a fresh v4 UUID; uniqueness among all ever-issued
    /// tokens is additionally enforced by the store's insert constraint.
    /// `ttl` of `None` means the invitation never expires.
    ///
    /// # Errors
    ///
    /// * [`CoreError::UnauthorizedIssuer`] - if the issuer may not invite
    ///   the payload's target role
    /// * [`CoreError::NotificationFailed`] - if the setup link could not
    ///   be delivered; the invitation is withdrawn
    pub async fn issue(
        &self,
        email: impl Into<String>,
        payload: OnboardingPayload,
        issuer: &Actor,
        ttl: Option<TimeDelta>,
    ) -> CoreResult<Invitation> {
        let email = email.into();
        let target_role = payload.role();
        if !scope::may_invite(issuer.role, target_role) {
            return Err(CoreError::UnauthorizedIssuer {
                issuer_role: issuer.role,
                target_role,
            });
        }

        // A doctor inviting a patient always pre-assigns themselves,
        // regardless of what the payload carried.
        let payload = match (issuer.role, payload) {
            (Role::Doctor, OnboardingPayload::Patient(mut onboarding)) => {
                onboarding.assigned_doctor = Some(issuer.account_id);
                OnboardingPayload::Patient(onboarding)
            }
            (_, payload) => payload,
        };

        let now = self.clock.now();
        let invitation = Invitation {
            token: InviteToken::new(),
            email,
            payload,
            issued_by: issuer.account_id,
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at: ttl.map(|ttl| now + ttl),
        };
        let invitation = self.store.insert_invitation(invitation).await?;

        let setup_url = self.config.setup_url(invitation.token);
        if let Err(err) = self.notifier.send(&invitation.email, &setup_url).await {
            warn!(
                email = %invitation.email,
                error = %err,
                "Notification failed, withdrawing invitation"
            );
            self.store.delete_invitation(invitation.token).await?;
            return Err(CoreError::NotificationFailed {
                email: invitation.email,
                reason: err.to_string(),
            });
        }

        info!(
            email = %invitation.email,
            role = %target_role,
            issuer = %issuer.account_id,
            "Invitation issued"
        );
        Ok(invitation)
    }

    /// Returns the read-only view an invitee sees before completing setup.
    ///
    /// Never mutates status - an expired invitation is rejected here while
    /// its stored row still reads PENDING.
    ///
    /// # Errors
    ///
    /// * [`CoreError::TokenNotFound`] - if no invitation carries the token
    /// * [`CoreError::InvitationNotPending`] - if the invitation was used
    ///   or is past its expiry
    pub async fn peek(&self, token: InviteToken) -> CoreResult<InvitationPreview> {
        let invitation = self
            .store
            .invitation(token)
            .await?
            .ok_or(CoreError::TokenNotFound)?;
        if !invitation.is_open(self.clock.now()) {
            return Err(CoreError::InvitationNotPending);
        }
        Ok(InvitationPreview::from(&invitation))
    }

    /// Atomically consumes the invitation: PENDING → USED.
    ///
    /// Of any number of concurrent consume calls on one token, exactly one
    /// succeeds; the rest observe [`CoreError::InvitationNotPending`]. The
    /// compare-and-swap happens at the store, not here.
    ///
    /// # Errors
    ///
    /// * [`CoreError::TokenNotFound`] - if no invitation carries the token
    /// * [`CoreError::InvitationNotPending`] - if the invitation was
    ///   already used, lost the race, or is past its expiry
    pub async fn consume(&self, token: InviteToken) -> CoreResult<Invitation> {
        let invitation = self.store.consume(token, self.clock.now()).await?;
        Ok(invitation)
    }
}
