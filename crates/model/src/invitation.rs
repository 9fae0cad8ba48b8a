//! Invitations and onboarding payloads.
//!
//! An invitation is a single onboarding offer: a random token bound to an
//! email and a target role, issued by an authorized account. The
//! role-specific onboarding hints travel as [`OnboardingPayload`], a closed
//! sum type with one variant per target role, so a malformed payload fails
//! at decode time rather than at profile-creation time. The invitation's
//! target role is derived from the payload variant, which makes a
//! role/payload mismatch unrepresentable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, InviteToken};
use crate::profile::Demographics;
use crate::role::Role;

/// Onboarding hints for a DOCTOR invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorOnboarding {
    /// Specialization to record on the doctor profile; empty when absent.
    pub specialization: Option<String>,
}

/// Onboarding hints for a PATIENT invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientOnboarding {
    /// Doctor to pre-assign to the new patient. Stamped with the issuing
    /// doctor's id when a doctor issues the invitation.
    pub assigned_doctor: Option<AccountId>,
    /// Demographics captured at invite time, used as defaults at completion.
    pub demographics: Demographics,
}

/// Role-specific onboarding payload, one closed variant per target role.
///
/// The serialized form is tagged with the role name, matching the role tags
/// used on the wire elsewhere:
///
/// ```json
/// { "role": "PATIENT", "assigned_doctor": "…", "demographics": { … } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum OnboardingPayload {
    /// An ADMIN invitation carries no extra onboarding data.
    #[serde(rename = "ADMIN")]
    Admin,
    /// A LAB invitation; the lab's name and address are supplied at completion.
    #[serde(rename = "LAB")]
    Lab,
    /// A DOCTOR invitation.
    #[serde(rename = "DOCTOR")]
    Doctor(DoctorOnboarding),
    /// A PATIENT invitation.
    #[serde(rename = "PATIENT")]
    Patient(PatientOnboarding),
}

impl OnboardingPayload {
    /// The target role implied by this payload.
    pub fn role(&self) -> Role {
        match self {
            OnboardingPayload::Admin => Role::Admin,
            OnboardingPayload::Lab => Role::Lab,
            OnboardingPayload::Doctor(_) => Role::Doctor,
            OnboardingPayload::Patient(_) => Role::Patient,
        }
    }
}

/// Persisted invitation status.
///
/// Note that expiry is not a persisted status: an invitation whose expiry
/// has elapsed still carries `Pending` in the store and reads as
/// [`EffectiveStatus::Expired`] via [`Invitation::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    /// Issued and not yet completed.
    Pending,
    /// Consumed by a completed account setup; terminal.
    Used,
}

/// Invitation status as observed at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveStatus {
    /// Open: may be peeked and consumed.
    Pending,
    /// Already consumed; terminal.
    Used,
    /// Still `Pending` in the store, but past its expiry.
    Expired,
}

/// A single onboarding offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    /// The unique, immutable token identifying this invitation.
    pub token: InviteToken,
    /// Email address the offer was sent to.
    pub email: String,
    /// Role-specific onboarding payload; also determines the target role.
    pub payload: OnboardingPayload,
    /// The account that issued the invitation.
    pub issued_by: AccountId,
    /// Persisted status.
    pub status: InvitationStatus,
    /// Issue timestamp.
    pub created_at: DateTime<Utc>,
    /// Expiry deadline; `None` means the invitation never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// The target role of this invitation.
    pub fn role(&self) -> Role {
        self.payload.role()
    }

    /// Computes the status as observed at `now`.
    ///
    /// A `Pending` invitation whose expiry has elapsed reads as `Expired`
    /// even though the stored status field was never rewritten.
    pub fn effective_status(&self, now: DateTime<Utc>) -> EffectiveStatus {
        match self.status {
            InvitationStatus::Used => EffectiveStatus::Used,
            InvitationStatus::Pending => match self.expires_at {
                Some(expiry) if now >= expiry => EffectiveStatus::Expired,
                _ => EffectiveStatus::Pending,
            },
        }
    }

    /// Returns `true` if the invitation may still be consumed at `now`.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == EffectiveStatus::Pending
    }
}

/// The read-only view returned when an invitee checks a token before
/// completing setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationPreview {
    /// Email the invitation was addressed to.
    pub email: String,
    /// Target role.
    pub role: Role,
    /// Onboarding payload.
    pub payload: OnboardingPayload,
}

impl From<&Invitation> for InvitationPreview {
    fn from(invitation: &Invitation) -> Self {
        Self {
            email: invitation.email.clone(),
            role: invitation.role(),
            payload: invitation.payload.clone(),
        }
    }
}
