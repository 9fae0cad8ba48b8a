//! Error types for the service layer.
//!
//! This module defines [`CoreError`], the closed taxonomy every operation
//! reports from. All variants are recoverable by the caller - they signal
//! bad input or a lost race, never a fatal process condition, and the core
//! never retries on its own (retrying a `UsernameTaken` or `RoomOccupied`
//! without new input would just fail again).
//!
//! # Storage Error Mapping
//!
//! Storage errors from the persistence layer are mapped onto the taxonomy
//! where a business meaning exists, and passed through otherwise:
//!
//! | Storage error | Core error |
//! |---------------|------------|
//! | Constraint(UsernameTaken) | UsernameTaken |
//! | Precondition(InvitationNotPending) | InvitationNotPending |
//! | Precondition(RoomOccupied) | RoomOccupied |
//! | Precondition(RoomEmpty) | RoomEmpty |
//! | Precondition(PatientAlreadyRoomed) | PatientAlreadyRoomed |
//! | Precondition(RoomUnderMaintenance) | RoomUnderMaintenance |
//! | NotFound(Invitation) | TokenNotFound |
//! | everything else | Storage (passthrough) |

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use medivault_model::{AccountId, Role, RoomId};
use medivault_persistence::error::{
    ConstraintError, NotFoundError, PreconditionError, StorageError,
};

/// The primary error type for all core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No invitation carries the presented token.
    #[error("no invitation matches the presented token")]
    TokenNotFound,

    /// The invitation was already used, or is past its expiry.
    #[error("invitation is no longer pending")]
    InvitationNotPending,

    /// The issuer lacks the right to invite the target role.
    #[error("{issuer_role} accounts may not issue {target_role} invitations")]
    UnauthorizedIssuer {
        issuer_role: Role,
        target_role: Role,
    },

    /// The desired username is already reserved.
    #[error("username already taken: {username}")]
    UsernameTaken { username: String },

    /// The room already has an occupant.
    #[error("room {room} is already occupied")]
    RoomOccupied { room: RoomId },

    /// The room has no occupant.
    #[error("room {room} is empty")]
    RoomEmpty { room: RoomId },

    /// The patient already occupies a room.
    #[error("patient {patient} already occupies a room")]
    PatientAlreadyRoomed { patient: AccountId },

    /// The requested discharge time is not in the future.
    #[error("discharge time must be in the future")]
    DischargeTimeNotFuture,

    /// The room is out of service.
    #[error("room {room} is under maintenance")]
    RoomUnderMaintenance { room: RoomId },

    /// The notification collaborator could not deliver the setup link.
    #[error("failed to notify {email}: {reason}")]
    NotificationFailed { email: String, reason: String },

    /// The actor may not perform this action at all.
    ///
    /// Used only for creation-type operations, where there is no resource
    /// whose absence could be reported instead. Scoped reads and occupancy
    /// mutations on invisible resources report absence, never this.
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// A storage fault with no business meaning at this layer.
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Constraint(ConstraintError::UsernameTaken { username }) => {
                CoreError::UsernameTaken { username }
            }
            StorageError::Precondition(PreconditionError::InvitationNotPending { .. }) => {
                CoreError::InvitationNotPending
            }
            StorageError::Precondition(PreconditionError::RoomOccupied { room }) => {
                CoreError::RoomOccupied { room }
            }
            StorageError::Precondition(PreconditionError::RoomEmpty { room }) => {
                CoreError::RoomEmpty { room }
            }
            StorageError::Precondition(PreconditionError::PatientAlreadyRoomed {
                patient, ..
            }) => CoreError::PatientAlreadyRoomed { patient },
            StorageError::Precondition(PreconditionError::RoomUnderMaintenance { room }) => {
                CoreError::RoomUnderMaintenance { room }
            }
            StorageError::NotFound(NotFoundError::Invitation) => CoreError::TokenNotFound,
            other => CoreError::Storage(other),
        }
    }
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
