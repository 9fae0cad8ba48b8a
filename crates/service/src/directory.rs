//! Scope-enforced directory over profiles and clinical records.
//!
//! Every read threads the actor's scope filter into the repository, so a
//! handler cannot forget to narrow its results; every create re-applies
//! the same visibility rules to the rows it references.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use medivault_model::{
    AccountId, Demographics, DoctorProfile, LabRequest, LabRequestId, PatientProfile, Role, Visit,
    VisitId,
};
use medivault_persistence::core::{ProfileStore, RecordStore};

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::scope::{self, Actor};

/// Read and create operations over profiles, visits, and lab requests,
/// all scoped to the acting account.
pub struct ProfileDirectory<S, C> {
    store: Arc<S>,
    clock: C,
}

impl<S, C> ProfileDirectory<S, C>
where
    S: ProfileStore + RecordStore,
    C: Clock,
{
    /// Creates a directory over the given store.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Lists the doctor profiles the actor may see.
    pub async fn list_doctors(&self, actor: &Actor) -> CoreResult<Vec<DoctorProfile>> {
        Ok(self.store.list_doctors(scope::doctor_filter(actor)).await?)
    }

    /// Lists the patient profiles the actor may see.
    pub async fn list_patients(&self, actor: &Actor) -> CoreResult<Vec<PatientProfile>> {
        Ok(self
            .store
            .list_patients(scope::patient_filter(actor))
            .await?)
    }

    /// Reads one doctor profile; `None` when absent or out of scope.
    pub async fn doctor(&self, actor: &Actor, id: AccountId) -> CoreResult<Option<DoctorProfile>> {
        Ok(self
            .store
            .doctor_profile(id, scope::doctor_filter(actor))
            .await?)
    }

    /// Reads one patient profile; `None` when absent or out of scope.
    pub async fn patient(
        &self,
        actor: &Actor,
        id: AccountId,
    ) -> CoreResult<Option<PatientProfile>> {
        Ok(self
            .store
            .patient_profile(id, scope::patient_filter(actor))
            .await?)
    }

    /// Lists the visit records the actor may see, newest first.
    pub async fn list_visits(&self, actor: &Actor) -> CoreResult<Vec<Visit>> {
        Ok(self.store.list_visits(scope::visit_filter(actor)).await?)
    }

    /// Records a visit; the treating doctor is always the acting doctor.
    ///
    /// The patient must be visible to the actor under their patient scope,
    /// otherwise the patient reads as absent.
    ///
    /// # Errors
    ///
    /// * [`CoreError::Forbidden`] - if the actor is not a doctor
    pub async fn record_visit(
        &self,
        actor: &Actor,
        patient: AccountId,
        visit_date: NaiveDate,
        diagnosis: impl Into<String>,
        prescription: impl Into<String>,
    ) -> CoreResult<Visit> {
        if actor.role != Role::Doctor {
            return Err(CoreError::Forbidden {
                message: "only doctors record visits".to_string(),
            });
        }
        self.visible_patient(actor, patient).await?;

        let visit = Visit {
            id: VisitId::new(),
            patient,
            doctor: actor.account_id,
            visit_date,
            diagnosis: diagnosis.into(),
            prescription: prescription.into(),
        };
        let visit = self.store.insert_visit(visit).await?;
        info!(patient = %patient, doctor = %actor.account_id, "Visit recorded");
        Ok(visit)
    }

    /// Places a lab test request for a patient, making the patient
    /// visible to the lab.
    ///
    /// # Errors
    ///
    /// * [`CoreError::Forbidden`] - if the actor is not a doctor
    pub async fn request_lab_test(
        &self,
        actor: &Actor,
        patient: AccountId,
        lab: AccountId,
    ) -> CoreResult<LabRequest> {
        if actor.role != Role::Doctor {
            return Err(CoreError::Forbidden {
                message: "only doctors request lab tests".to_string(),
            });
        }
        self.visible_patient(actor, patient).await?;

        let request = LabRequest {
            id: LabRequestId::new(),
            patient,
            lab,
            requested_at: self.clock.now(),
        };
        let request = self.store.insert_lab_request(request).await?;
        info!(patient = %patient, lab = %lab, "Lab test requested");
        Ok(request)
    }

    /// Creates a patient profile for an already-provisioned account.
    ///
    /// A doctor creating a patient is auto-assigned to them; an admin must
    /// pass an explicit assignment list, possibly empty. No other role may
    /// create patients.
    ///
    /// # Errors
    ///
    /// * [`CoreError::Forbidden`] - if the actor is neither admin nor
    ///   doctor
    pub async fn create_patient_profile(
        &self,
        actor: &Actor,
        account_id: AccountId,
        demographics: Demographics,
        assigned_doctors: Vec<AccountId>,
    ) -> CoreResult<PatientProfile> {
        let assigned_doctors = match actor.role {
            // Auto-assignment: the creating doctor joins the set no matter
            // what the request carried.
            Role::Doctor => {
                let mut set: std::collections::BTreeSet<_> =
                    assigned_doctors.into_iter().collect();
                set.insert(actor.account_id);
                set
            }
            Role::Admin => assigned_doctors.into_iter().collect(),
            Role::Patient | Role::Lab => {
                return Err(CoreError::Forbidden {
                    message: "only admins and doctors create patients".to_string(),
                });
            }
        };

        let profile = self
            .store
            .insert_patient_profile(PatientProfile {
                account_id,
                assigned_doctors,
                demographics,
            })
            .await?;
        info!(patient = %account_id, creator = %actor.account_id, "Patient profile created");
        Ok(profile)
    }

    /// Confirms the patient exists and is inside the actor's scope.
    ///
    /// An out-of-scope patient yields the same absence error as a patient
    /// that was never created.
    async fn visible_patient(&self, actor: &Actor, patient: AccountId) -> CoreResult<()> {
        let filter = scope::patient_filter(actor);
        if self.store.patient_profile(patient, filter).await?.is_none() {
            return Err(CoreError::Storage(
                medivault_persistence::error::NotFoundError::PatientProfile {
                    account_id: patient,
                }
                .into(),
            ));
        }
        Ok(())
    }
}
