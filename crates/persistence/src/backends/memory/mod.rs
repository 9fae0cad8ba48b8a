//! In-memory backend.
//!
//! [`MemoryBackend`] keeps every table in a single [`parking_lot::RwLock`].
//! Conditional writes take the write lock once, re-check their precondition
//! against current state, and either apply the whole mutation or fail it -
//! no intermediate state is ever observable, and two racing writers
//! serialize on the lock with exactly one observing success.
//!
//! Besides the entity tables the state carries three indexes that back the
//! contract's uniqueness and cross-entity invariants:
//!
//! - `usernames` - username → account, reserving usernames at insert
//! - `room_numbers` - room number → room, reserving numbers at insert
//! - `occupancy` - patient → room, enforcing at-most-one-room-per-patient
//!   inside the same critical section as the admission itself

mod stores;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use medivault_model::{
    Account, AccountId, DoctorFilter, DoctorProfile, Invitation, InviteToken, LabProfile,
    LabRequest, PatientFilter, PatientProfile, Room, RoomId, Visit, VisitFilter,
};

/// The tables and indexes behind a [`MemoryBackend`].
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) accounts: HashMap<AccountId, Account>,
    pub(crate) usernames: HashMap<String, AccountId>,
    pub(crate) doctors: HashMap<AccountId, DoctorProfile>,
    pub(crate) patients: HashMap<AccountId, PatientProfile>,
    pub(crate) labs: HashMap<AccountId, LabProfile>,
    pub(crate) invitations: HashMap<InviteToken, Invitation>,
    pub(crate) rooms: HashMap<RoomId, Room>,
    pub(crate) room_numbers: HashMap<String, RoomId>,
    pub(crate) occupancy: HashMap<AccountId, RoomId>,
    pub(crate) visits: Vec<Visit>,
    pub(crate) lab_requests: Vec<LabRequest>,
}

impl MemoryState {
    /// Evaluates a doctor-scope filter against stored relations.
    pub(crate) fn doctor_visible(&self, profile: &DoctorProfile, filter: DoctorFilter) -> bool {
        match filter {
            DoctorFilter::All => true,
            DoctorFilter::Only(id) => profile.account_id == id,
            DoctorFilter::AssignedTo(patient) => self
                .patients
                .get(&patient)
                .is_some_and(|p| p.is_assigned(profile.account_id)),
            DoctorFilter::None => false,
        }
    }

    /// Evaluates a patient-scope filter against stored relations.
    pub(crate) fn patient_visible(&self, profile: &PatientProfile, filter: PatientFilter) -> bool {
        match filter {
            PatientFilter::All => true,
            PatientFilter::Only(id) => profile.account_id == id,
            PatientFilter::OfDoctor(doctor) => profile.is_assigned(doctor),
            PatientFilter::WithRequestAt(lab) => self
                .lab_requests
                .iter()
                .any(|r| r.lab == lab && r.patient == profile.account_id),
            PatientFilter::None => false,
        }
    }

    /// Evaluates a visit-scope filter.
    pub(crate) fn visit_visible(&self, visit: &Visit, filter: VisitFilter) -> bool {
        match filter {
            VisitFilter::All => true,
            VisitFilter::OfDoctor(doctor) => visit.doctor == doctor,
            VisitFilter::OfPatient(patient) => visit.patient == patient,
            VisitFilter::None => false,
        }
    }
}

/// In-memory implementation of every store trait.
///
/// Cloning is cheap and clones share state, so a backend handle can be
/// passed to each component the way a connection pool would be.
///
/// # Example
///
/// ```
/// use medivault_model::{Room, RoomType};
/// use medivault_persistence::backends::memory::MemoryBackend;
/// use medivault_persistence::core::RoomStore;
///
/// # async fn example() -> Result<(), medivault_persistence::error::StorageError> {
/// let store = MemoryBackend::new();
/// store
///     .insert_room(Room::new("101", RoomType::General, "Cardiology"))
///     .await?;
/// assert_eq!(store.list_rooms().await?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    pub(crate) state: Arc<RwLock<MemoryState>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}
