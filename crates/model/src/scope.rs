//! Access-scope filter values.
//!
//! These types are the data half of the access-scope design: the service
//! layer maps an actor's role and identity to a filter value, and every
//! repository query takes the filter and evaluates it against stored
//! relations. Authorization is therefore structural - a repository cannot
//! be queried without a filter - instead of relying on each caller to
//! remember to narrow its results.
//!
//! A resource excluded by a filter is indistinguishable from a resource
//! that does not exist. Scoped reads return `None` or omit the row; they
//! never return a permission error, so an unauthorized caller learns
//! nothing about what exists.

use crate::ids::AccountId;

/// Which doctor profiles an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorFilter {
    /// Every doctor profile.
    All,
    /// Exactly one doctor profile (a doctor viewing themselves).
    Only(AccountId),
    /// The doctors assigned to the given patient.
    AssignedTo(AccountId),
    /// No doctor profiles at all.
    None,
}

/// Which patient profiles an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientFilter {
    /// Every patient profile.
    All,
    /// Exactly one patient profile (a patient viewing themselves).
    Only(AccountId),
    /// Patients that have the given doctor in their assigned set.
    OfDoctor(AccountId),
    /// Patients with a test request at the given lab.
    WithRequestAt(AccountId),
    /// No patient profiles at all.
    None,
}

/// Which visit records an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFilter {
    /// Every visit.
    All,
    /// Visits where the given doctor treated the patient.
    OfDoctor(AccountId),
    /// Visits belonging to the given patient.
    OfPatient(AccountId),
    /// No visits at all.
    None,
}

/// What an actor may do with rooms.
///
/// Room access is coarser than the profile filters: roles that see rooms
/// see all of them, so there is no per-room predicate - only a capability
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoomAccess {
    /// Rooms are invisible; every room operation reads as absent.
    None,
    /// May list and read every room.
    Read,
    /// May additionally admit, schedule discharges, and discharge.
    Manage,
}

impl RoomAccess {
    /// Returns `true` if rooms are visible at all.
    pub fn can_read(&self) -> bool {
        *self >= RoomAccess::Read
    }

    /// Returns `true` if occupancy may be mutated.
    pub fn can_manage(&self) -> bool {
        *self >= RoomAccess::Manage
    }
}
