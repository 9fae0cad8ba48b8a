//! Role profiles created during provisioning.
//!
//! Each profile is 1:1 with an account of the matching role and is keyed by
//! that account's id. Profiles are created atomically with their account by
//! the provisioner - a doctor account without a doctor profile is
//! unrepresentable in a consistent store.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::AccountId;

/// Optional demographic fields on a patient profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

impl Demographics {
    /// Returns `true` when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.date_of_birth.is_none() && self.phone_number.is_none() && self.address.is_none()
    }
}

/// Profile for an account with role DOCTOR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorProfile {
    /// The owning doctor account.
    pub account_id: AccountId,
    /// Free-text specialization, empty when none was supplied.
    pub specialization: String,
}

/// Profile for an account with role PATIENT.
///
/// The assigned-doctor set is unbounded and may be empty. Room occupancy is
/// deliberately not recorded here - the room side owns that relation, and
/// the at-most-one-room-per-patient invariant is enforced by the store's
/// occupancy index, not by a profile field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// The owning patient account.
    pub account_id: AccountId,
    /// Doctor accounts assigned to this patient.
    pub assigned_doctors: BTreeSet<AccountId>,
    /// Optional demographic fields.
    pub demographics: Demographics,
}

impl PatientProfile {
    /// Returns `true` if the given doctor is assigned to this patient.
    pub fn is_assigned(&self, doctor: AccountId) -> bool {
        self.assigned_doctors.contains(&doctor)
    }
}

/// Profile for an account with role LAB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabProfile {
    /// The owning lab account.
    pub account_id: AccountId,
    /// Display name of the lab.
    pub name: String,
    /// Street address of the lab.
    pub address: String,
}
