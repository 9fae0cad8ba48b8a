//! Access scope: the role → visibility mapping.
//!
//! This module is the policy half of the access-scope design: pure,
//! stateless functions from an [`Actor`] to the filter values defined in
//! `medivault_model::scope`. Repositories evaluate the filters; nothing
//! here touches storage.
//!
//! # Policy Table
//!
//! | resource | ADMIN | DOCTOR | PATIENT | LAB |
//! |----------|-------|--------|---------|-----|
//! | DoctorProfile | all | self only | assigned doctors | none |
//! | PatientProfile | all | own patients | self only | patients with a request at this lab |
//! | Visit | all | own patients' visits | own visits | none |
//! | Room | manage | manage | none | none |
//!
//! A resource excluded by scope reads as absent - never as a permission
//! error - so unauthorized callers cannot probe for existence.

use medivault_model::{
    Account, AccountId, DoctorFilter, PatientFilter, Role, RoomAccess, VisitFilter,
};

/// The identity on whose behalf an operation runs.
///
/// Boundary layers authenticate a request and reduce it to this pair; the
/// core never re-reads the account row to make scope decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The acting account.
    pub account_id: AccountId,
    /// The acting account's role.
    pub role: Role,
}

impl Actor {
    /// Creates an actor from its parts.
    pub fn new(account_id: AccountId, role: Role) -> Self {
        Self { account_id, role }
    }
}

impl From<&Account> for Actor {
    fn from(account: &Account) -> Self {
        Self::new(account.id, account.role)
    }
}

/// Which doctor profiles the actor may see.
pub fn doctor_filter(actor: &Actor) -> DoctorFilter {
    match actor.role {
        Role::Admin => DoctorFilter::All,
        Role::Doctor => DoctorFilter::Only(actor.account_id),
        Role::Patient => DoctorFilter::AssignedTo(actor.account_id),
        Role::Lab => DoctorFilter::None,
    }
}

/// Which patient profiles the actor may see.
pub fn patient_filter(actor: &Actor) -> PatientFilter {
    match actor.role {
        Role::Admin => PatientFilter::All,
        Role::Doctor => PatientFilter::OfDoctor(actor.account_id),
        Role::Patient => PatientFilter::Only(actor.account_id),
        Role::Lab => PatientFilter::WithRequestAt(actor.account_id),
    }
}

/// Which visit records the actor may see.
pub fn visit_filter(actor: &Actor) -> VisitFilter {
    match actor.role {
        Role::Admin => VisitFilter::All,
        Role::Doctor => VisitFilter::OfDoctor(actor.account_id),
        Role::Patient => VisitFilter::OfPatient(actor.account_id),
        Role::Lab => VisitFilter::None,
    }
}

/// What the actor may do with rooms.
pub fn room_access(actor: &Actor) -> RoomAccess {
    match actor.role {
        Role::Admin | Role::Doctor => RoomAccess::Manage,
        Role::Patient | Role::Lab => RoomAccess::None,
    }
}

/// Whether `issuer` may issue an invitation for `target`.
///
/// Admins invite every role; doctors invite patients only. Patient and lab
/// accounts never issue invitations.
pub fn may_invite(issuer: Role, target: Role) -> bool {
    match issuer {
        Role::Admin => true,
        Role::Doctor => target == Role::Patient,
        Role::Patient | Role::Lab => false,
    }
}
