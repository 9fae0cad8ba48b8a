//! Account role tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The role tag carried by every account.
///
/// Roles are immutable after account creation - there is no role-change
/// operation anywhere in the system. The wire names match the upper-case
/// tags used by invitation payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full administrative access; may issue invitations for every role.
    Admin,
    /// Clinical staff; sees their own profile, their assigned patients, and rooms.
    Doctor,
    /// A patient; sees their own profile, their assigned doctors, and their own records.
    Patient,
    /// A diagnostic lab; sees patients with an open test request at the lab.
    Lab,
}

impl Role {
    /// Returns the canonical upper-case tag for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Doctor => "DOCTOR",
            Role::Patient => "PATIENT",
            Role::Lab => "LAB",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "DOCTOR" => Ok(Role::Doctor),
            "PATIENT" => Ok(Role::Patient),
            "LAB" => Ok(Role::Lab),
            other => Err(format!("unknown role tag: {}", other)),
        }
    }
}
