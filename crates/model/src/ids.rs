//! Opaque identifier newtypes.
//!
//! Every entity identifier is a UUID wrapped in its own newtype so that a
//! room id can never be passed where an account id is expected. The
//! invitation token is also defined here: a freshly generated v4 UUID,
//! which carries 122 bits of randomness and therefore satisfies the
//! global-uniqueness requirement for tokens without any coordination.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id! {
    /// Identifies an account. Role profiles are 1:1 with accounts and are
    /// keyed by the same id.
    AccountId
}

uuid_id! {
    /// Identifies a hospital room. The human-facing room number is a
    /// separate, uniqueness-constrained field on [`crate::Room`].
    RoomId
}

uuid_id! {
    /// Identifies a clinical visit record.
    VisitId
}

uuid_id! {
    /// Identifies a lab test request.
    LabRequestId
}

uuid_id! {
    /// A single-use invitation token.
    ///
    /// Tokens are globally unique among all ever-issued tokens and immutable
    /// once issued. They grant the right to create exactly one account of a
    /// predetermined role and email.
    InviteToken
}
