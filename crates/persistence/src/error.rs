//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence
//! layer, following a hierarchy that separates uniqueness-constraint
//! violations, failed conditional-write preconditions, missing rows, and
//! backend faults. The service layer maps these onto its caller-facing
//! taxonomy the same way a REST boundary maps storage errors onto HTTP
//! status codes.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use medivault_model::{AccountId, InviteToken, RoomId};

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A uniqueness constraint rejected an insert.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// A conditional write found its precondition no longer holding.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// A referenced row does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backend itself failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Uniqueness-constraint violations.
///
/// These are enforced by the store at insert time. There is deliberately no
/// "check then insert" path in the contract - two concurrent inserts with
/// the same key must resolve here, with exactly one winner.
#[derive(Error, Debug)]
pub enum ConstraintError {
    /// The username is already reserved by an existing account.
    #[error("username already taken: {username}")]
    UsernameTaken { username: String },

    /// An invitation with this token was already issued.
    #[error("invitation token already issued: {token}")]
    TokenExists { token: InviteToken },

    /// A room with this number already exists.
    #[error("room number already in use: {number}")]
    RoomNumberExists { number: String },

    /// The account already has a profile of this kind.
    #[error("profile already exists for account {account_id}")]
    ProfileExists { account_id: AccountId },
}

/// Failed preconditions on conditional writes.
///
/// Each variant names the stored state that stopped the write. A caller
/// that lost a race receives the same error as a caller that supplied a
/// stale view - the store does not distinguish the two.
#[derive(Error, Debug)]
pub enum PreconditionError {
    /// The invitation is not open: already used, or past its expiry.
    #[error("invitation {token} is not pending")]
    InvitationNotPending { token: InviteToken },

    /// The room already has an occupant.
    #[error("room {room} is already occupied")]
    RoomOccupied { room: RoomId },

    /// The room has no occupant.
    #[error("room {room} is empty")]
    RoomEmpty { room: RoomId },

    /// The patient already occupies a different room.
    #[error("patient {patient} already occupies room {occupied_room}")]
    PatientAlreadyRoomed {
        patient: AccountId,
        occupied_room: RoomId,
    },

    /// The room is out of service.
    #[error("room {room} is under maintenance")]
    RoomUnderMaintenance { room: RoomId },
}

/// Missing rows.
#[derive(Error, Debug)]
pub enum NotFoundError {
    /// No invitation carries the presented token.
    #[error("no invitation matches the presented token")]
    Invitation,

    /// No account with this id.
    #[error("account not found: {id}")]
    Account { id: AccountId },

    /// No room with this id.
    #[error("room not found: {id}")]
    Room { id: RoomId },

    /// No patient profile for this account.
    #[error("patient profile not found for account {account_id}")]
    PatientProfile { account_id: AccountId },

    /// No doctor profile for this account.
    #[error("doctor profile not found for account {account_id}")]
    DoctorProfile { account_id: AccountId },
}

/// Backend faults: connectivity, corruption, anything that is not a
/// well-formed rejection of the request.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("storage backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("storage backend failure: {message}")]
    Internal { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages_name_the_row() {
        let room = RoomId::new();
        let err = StorageError::from(PreconditionError::RoomEmpty { room });
        assert!(err.to_string().contains(&room.to_string()));
    }

    #[test]
    fn test_not_found_token_message_does_not_echo_the_token() {
        // The token is a credential; absence reports must not leak it.
        let err = StorageError::from(NotFoundError::Invitation);
        assert_eq!(err.to_string(), "no invitation matches the presented token");
    }
}
