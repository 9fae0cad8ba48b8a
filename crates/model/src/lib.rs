//! Medivault Domain Model
//!
//! This crate contains the strongly-typed domain model shared by the
//! Medivault persistence and service layers: accounts and their role tags,
//! single-use invitations with per-role onboarding payloads, the role
//! profiles created during provisioning, hospital rooms with scheduled
//! discharge, and the filter values that express role-scoped visibility.
//!
//! # Architecture
//!
//! The model crate is deliberately free of storage and runtime concerns -
//! everything here is plain data with `serde` derives:
//!
//! - [`role`] - The closed set of account role tags
//! - [`ids`] - Opaque UUID-backed identifier newtypes
//! - [`account`] - Accounts and the credentials supplied at setup
//! - [`invitation`] - The invitation record and its onboarding payload sum type
//! - [`profile`] - Doctor, patient, and lab profiles
//! - [`room`] - Rooms, room types, and occupancy state
//! - [`visit`] - Clinical visit records
//! - [`lab`] - Lab test requests linking patients to labs
//! - [`scope`] - Access-scope filter values evaluated by repositories

pub mod account;
pub mod ids;
pub mod invitation;
pub mod lab;
pub mod profile;
pub mod role;
pub mod room;
pub mod scope;
pub mod visit;

pub use account::{Account, NewAccount, PasswordHash};
pub use ids::{AccountId, InviteToken, LabRequestId, RoomId, VisitId};
pub use invitation::{
    DoctorOnboarding, EffectiveStatus, Invitation, InvitationPreview, InvitationStatus,
    OnboardingPayload, PatientOnboarding,
};
pub use lab::LabRequest;
pub use profile::{Demographics, DoctorProfile, LabProfile, PatientProfile};
pub use role::Role;
pub use room::{Room, RoomStatus, RoomType};
pub use scope::{DoctorFilter, PatientFilter, RoomAccess, VisitFilter};
pub use visit::Visit;
