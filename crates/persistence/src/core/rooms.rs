//! Room storage trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use medivault_model::{AccountId, Room, RoomId};

use crate::error::StorageResult;

/// Storage for rooms and their occupancy state.
///
/// Occupancy mutations are conditional writes: each one names its
/// precondition, the store re-evaluates the precondition against the
/// current row at commit time, and a write whose precondition no longer
/// holds fails as a whole. The cross-entity invariant - a patient occupies
/// at most one room across the whole room set - is enforced by an
/// occupancy index consulted inside the same conditional write as the
/// admission, never by a separate earlier read.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Inserts a new room, reserving its room number.
    ///
    /// # Errors
    ///
    /// * `StorageError::Constraint(RoomNumberExists)` - if the number is
    ///   already in use
    async fn insert_room(&self, room: Room) -> StorageResult<Room>;

    /// Reads a room by id. Returns `None` when absent.
    async fn room(&self, id: RoomId) -> StorageResult<Option<Room>>;

    /// Lists all rooms, ordered by room number.
    ///
    /// Side-effect free: overdue discharges are applied by the sweep, never
    /// by reads.
    async fn list_rooms(&self) -> StorageResult<Vec<Room>>;

    /// Admits a patient into a room.
    ///
    /// Precondition, evaluated atomically: the room is ACTIVE, has no
    /// occupant, and the patient occupies no room anywhere. On success the
    /// occupant is set and any stale scheduled discharge is cleared.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound(Room)` - if the room does not exist
    /// * `StorageError::Precondition(RoomOccupied)` - if the room already
    ///   has an occupant
    /// * `StorageError::Precondition(PatientAlreadyRoomed)` - if the
    ///   patient already occupies a room (including this one)
    /// * `StorageError::Precondition(RoomUnderMaintenance)` - if the room
    ///   is out of service
    async fn admit(&self, room: RoomId, patient: AccountId) -> StorageResult<Room>;

    /// Records a scheduled discharge time for the room's occupant.
    ///
    /// The future-time check belongs to the service layer; the store only
    /// requires an occupant to exist.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound(Room)` - if the room does not exist
    /// * `StorageError::Precondition(RoomEmpty)` - if the room has no
    ///   occupant
    async fn set_discharge_schedule(&self, room: RoomId, at: DateTime<Utc>) -> StorageResult<Room>;

    /// Discharges the room's occupant, clearing occupant and schedule.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound(Room)` - if the room does not exist
    /// * `StorageError::Precondition(RoomEmpty)` - if the room has no
    ///   occupant
    async fn clear_occupancy(&self, room: RoomId) -> StorageResult<Room>;

    /// Discharges the room's occupant iff the discharge is still due.
    ///
    /// This is the sweep's tolerant variant of
    /// [`clear_occupancy`](Self::clear_occupancy): the precondition
    /// "occupant set and scheduled discharge at or before `now`" is
    /// re-evaluated at commit time, and a room that stopped matching -
    /// discharged by a concurrent sweep, manually discharged, or
    /// rescheduled - yields `Ok(None)` rather than an error.
    async fn clear_occupancy_if_due(
        &self,
        room: RoomId,
        now: DateTime<Utc>,
    ) -> StorageResult<Option<Room>>;

    /// Lists rooms whose occupant is set and scheduled discharge is at or
    /// before `now`.
    async fn rooms_due_for_discharge(&self, now: DateTime<Utc>) -> StorageResult<Vec<Room>>;
}
