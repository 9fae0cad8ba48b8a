//! Role-profile storage trait.

use async_trait::async_trait;

use medivault_model::{
    AccountId, DoctorFilter, DoctorProfile, LabProfile, PatientFilter, PatientProfile,
};

use crate::error::StorageResult;

/// Storage for the role profiles created during provisioning.
///
/// Every query takes an access-scope filter value and evaluates it against
/// the stored relations (assignment sets, lab requests). A profile excluded
/// by the filter is reported exactly like a profile that does not exist, so
/// callers cannot distinguish "hidden" from "absent".
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Inserts a doctor profile for an account.
    ///
    /// # Errors
    ///
    /// * `StorageError::Constraint(ProfileExists)` - if the account already
    ///   has a doctor profile
    async fn insert_doctor_profile(&self, profile: DoctorProfile) -> StorageResult<DoctorProfile>;

    /// Inserts a patient profile for an account.
    ///
    /// # Errors
    ///
    /// * `StorageError::Constraint(ProfileExists)` - if the account already
    ///   has a patient profile
    async fn insert_patient_profile(&self, profile: PatientProfile)
    -> StorageResult<PatientProfile>;

    /// Inserts a lab profile for an account.
    ///
    /// # Errors
    ///
    /// * `StorageError::Constraint(ProfileExists)` - if the account already
    ///   has a lab profile
    async fn insert_lab_profile(&self, profile: LabProfile) -> StorageResult<LabProfile>;

    /// Reads a lab profile.
    ///
    /// Lab profiles carry no scoped relations, so this read is unfiltered.
    async fn lab_profile(&self, id: AccountId) -> StorageResult<Option<LabProfile>>;

    /// Reads a doctor profile, subject to the filter.
    ///
    /// Returns `None` both when the profile is absent and when the filter
    /// excludes it.
    async fn doctor_profile(
        &self,
        id: AccountId,
        filter: DoctorFilter,
    ) -> StorageResult<Option<DoctorProfile>>;

    /// Reads a patient profile, subject to the filter.
    ///
    /// Returns `None` both when the profile is absent and when the filter
    /// excludes it.
    async fn patient_profile(
        &self,
        id: AccountId,
        filter: PatientFilter,
    ) -> StorageResult<Option<PatientProfile>>;

    /// Lists the doctor profiles visible through the filter.
    async fn list_doctors(&self, filter: DoctorFilter) -> StorageResult<Vec<DoctorProfile>>;

    /// Lists the patient profiles visible through the filter.
    async fn list_patients(&self, filter: PatientFilter) -> StorageResult<Vec<PatientProfile>>;

    /// Adds a doctor to a patient's assigned set.
    ///
    /// Idempotent: assigning an already-assigned doctor leaves the set
    /// unchanged.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound(PatientProfile)` - if the patient has no
    ///   profile
    /// * `StorageError::NotFound(DoctorProfile)` - if the doctor has no
    ///   profile
    async fn assign_doctor(
        &self,
        patient: AccountId,
        doctor: AccountId,
    ) -> StorageResult<PatientProfile>;
}
