//! Hospital rooms and occupancy state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, RoomId};

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    /// General ward bed.
    General,
    /// Intensive care unit.
    Icu,
    /// Single-occupancy private room.
    Private,
    /// Semi-private (shared) room.
    Semi,
}

/// Operational status of a room, orthogonal to occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// In service and admitting.
    Active,
    /// Out of service; admissions are rejected.
    Maintenance,
}

/// A hospital room.
///
/// Invariants, enforced by the room store rather than this struct:
/// a room holds at most one occupant; a patient occupies at most one room
/// across the whole room set; and `scheduled_discharge` is meaningful only
/// while `occupant` is set - it is cleared whenever the occupant changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Human-facing room number, unique across all rooms.
    pub number: String,
    /// Room category.
    pub room_type: RoomType,
    /// Clinical speciality the room is equipped for.
    pub speciality: String,
    /// Operational status.
    pub status: RoomStatus,
    /// The patient currently admitted, if any.
    pub occupant: Option<AccountId>,
    /// When the current occupant is due to be discharged automatically.
    pub scheduled_discharge: Option<DateTime<Utc>>,
}

impl Room {
    /// Creates an empty, active room.
    pub fn new(number: impl Into<String>, room_type: RoomType, speciality: impl Into<String>) -> Self {
        Self {
            id: RoomId::new(),
            number: number.into(),
            room_type,
            speciality: speciality.into(),
            status: RoomStatus::Active,
            occupant: None,
            scheduled_discharge: None,
        }
    }

    /// Returns `true` while a patient is admitted to this room.
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Returns `true` if the scheduled discharge has elapsed at `now`.
    pub fn is_discharge_due(&self, now: DateTime<Utc>) -> bool {
        match (self.occupant, self.scheduled_discharge) {
            (Some(_), Some(at)) => at <= now,
            _ => false,
        }
    }
}
