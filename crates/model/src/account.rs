//! Accounts and setup credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AccountId;
use crate::role::Role;

/// An opaque, already-hashed password.
///
/// The hashing algorithm is chosen by the boundary layer; the core only
/// stores and compares the resulting opaque string. `Debug` is implemented
/// manually so hashes never leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps a hash produced by the boundary layer.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the stored hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// An identity with a role tag.
///
/// Accounts are created by the account provisioner when an invitation is
/// completed, or out-of-band during superuser bootstrap (always with role
/// [`Role::Admin`]). The username is unique across all accounts, enforced
/// by the record store at insert time, and the role never changes after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Unique login name, reserved atomically at creation.
    pub username: String,
    /// The email the invitation was addressed to; never client-supplied.
    pub email: String,
    /// Opaque password hash.
    pub password: PasswordHash,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Immutable role tag.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The credentials and names an invitee supplies when completing setup.
///
/// The email is deliberately absent: it is always taken from the
/// invitation, so an account can never be created under an unverified
/// address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    /// Desired login name.
    pub username: String,
    /// Password hash produced by the boundary layer.
    pub password: PasswordHash,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}
