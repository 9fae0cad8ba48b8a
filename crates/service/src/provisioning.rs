//! Account provisioning from completed invitations.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use medivault_model::{
    Account, AccountId, Demographics, DoctorProfile, InviteToken, LabProfile, NewAccount,
    OnboardingPayload, PatientProfile,
};
use medivault_persistence::core::{AccountStore, InvitationStore, ProfileStore};

use crate::clock::Clock;
use crate::error::CoreResult;

/// Role-specific fields an invitee may supply alongside their credentials.
///
/// Fields that do not apply to the invitation's target role are ignored.
#[derive(Debug, Clone, Default)]
pub struct CompletionFields {
    /// Demographics for a PATIENT completion; when present they replace
    /// the invitation payload's demographics wholesale.
    pub demographics: Option<Demographics>,
    /// An additional doctor to assign to a PATIENT completion, unioned
    /// with any doctor carried in the invitation payload.
    pub assigned_doctor: Option<AccountId>,
    /// Display name for a LAB completion.
    pub lab_name: Option<String>,
    /// Street address for a LAB completion.
    pub lab_address: Option<String>,
}

/// Consumes completed invitations and creates the matching account and
/// role profile.
///
/// # At-Most-Once
///
/// `complete` consumes the invitation *first*, so an invalid token can
/// never produce a partial account. The flip side is documented and
/// deliberate: if a later step fails - most plausibly a taken username -
/// the invitation is already spent and stays spent. There is no automatic
/// rollback or retry; an operator re-issues a fresh invitation. Restoring
/// the token here would reopen the token-reuse race that the consume
/// compare-and-swap exists to close.
pub struct AccountProvisioner<S, C> {
    store: Arc<S>,
    clock: C,
}

impl<S, C> AccountProvisioner<S, C>
where
    S: InvitationStore + AccountStore + ProfileStore,
    C: Clock,
{
    /// Creates a provisioner over the given store.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Completes an invitation: consume, create account, create profile.
    ///
    /// The account's email always comes from the invitation - any
    /// client-supplied address is ignored, so accounts only ever exist
    /// under the address the offer was sent to. The username is reserved
    /// by the account insert itself; there is no pre-check to race
    /// against.
    ///
    /// # Errors
    ///
    /// * [`CoreError::TokenNotFound`](crate::CoreError::TokenNotFound) -
    ///   if no invitation carries the token
    /// * [`CoreError::InvitationNotPending`](crate::CoreError::InvitationNotPending) -
    ///   if the invitation was used or is past its expiry
    /// * [`CoreError::UsernameTaken`](crate::CoreError::UsernameTaken) -
    ///   if the username is reserved; the invitation is spent regardless
    pub async fn complete(
        &self,
        token: InviteToken,
        new_account: NewAccount,
        fields: CompletionFields,
    ) -> CoreResult<Account> {
        let now = self.clock.now();
        let invitation = self.store.consume(token, now).await?;

        let account = Account {
            id: AccountId::new(),
            username: new_account.username,
            email: invitation.email.clone(),
            password: new_account.password,
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            role: invitation.role(),
            created_at: now,
        };
        let account = self.store.insert_account(account).await?;

        match invitation.payload {
            OnboardingPayload::Admin => {}
            OnboardingPayload::Lab => {
                self.store
                    .insert_lab_profile(LabProfile {
                        account_id: account.id,
                        name: fields.lab_name.unwrap_or_default(),
                        address: fields.lab_address.unwrap_or_default(),
                    })
                    .await?;
            }
            OnboardingPayload::Doctor(onboarding) => {
                self.store
                    .insert_doctor_profile(DoctorProfile {
                        account_id: account.id,
                        specialization: onboarding.specialization.unwrap_or_default(),
                    })
                    .await?;
            }
            OnboardingPayload::Patient(onboarding) => {
                let demographics = fields.demographics.unwrap_or(onboarding.demographics);
                let assigned_doctors: BTreeSet<AccountId> = onboarding
                    .assigned_doctor
                    .into_iter()
                    .chain(fields.assigned_doctor)
                    .collect();
                self.store
                    .insert_patient_profile(PatientProfile {
                        account_id: account.id,
                        assigned_doctors,
                        demographics,
                    })
                    .await?;
            }
        }

        info!(
            username = %account.username,
            role = %account.role,
            "Account provisioned from invitation"
        );
        Ok(account)
    }
}
