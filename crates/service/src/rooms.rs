//! Room occupancy lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use medivault_model::{AccountId, Room, RoomId};
use medivault_persistence::core::RoomStore;
use medivault_persistence::error::{NotFoundError, StorageError};

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::scope::{self, Actor};

/// Owns room occupancy: admission, scheduled discharge, and the sweep's
/// tolerant discharge path.
///
/// Every occupancy mutation is a conditional write resolved at the store,
/// so racing requests - including the background sweep racing a manual
/// discharge - serialize there and exactly one wins.
///
/// Actors without room access observe rooms as absent: their reads return
/// nothing and their mutations fail exactly as they would against a room
/// id that was never created.
pub struct RoomLifecycleManager<S, C> {
    store: Arc<S>,
    clock: C,
}

impl<S, C> RoomLifecycleManager<S, C>
where
    S: RoomStore,
    C: Clock,
{
    /// Creates a manager over the given store.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// The absence error an unauthorized actor receives: identical to the
    /// one a nonexistent room would produce.
    fn absent(room: RoomId) -> CoreError {
        StorageError::from(NotFoundError::Room { id: room }).into()
    }

    /// Lists rooms visible to the actor, ordered by room number.
    ///
    /// Side-effect free: overdue discharges are applied by the sweep,
    /// never by reads.
    pub async fn list_rooms(&self, actor: &Actor) -> CoreResult<Vec<Room>> {
        if !scope::room_access(actor).can_read() {
            return Ok(Vec::new());
        }
        Ok(self.store.list_rooms().await?)
    }

    /// Reads one room, or `None` when absent or invisible to the actor.
    pub async fn room(&self, actor: &Actor, room: RoomId) -> CoreResult<Option<Room>> {
        if !scope::room_access(actor).can_read() {
            return Ok(None);
        }
        Ok(self.store.room(room).await?)
    }

    /// Admits a patient into a room.
    ///
    /// The store enforces the whole precondition atomically: room ACTIVE
    /// and empty, patient roomed nowhere. Any stale scheduled discharge is
    /// cleared by the admission.
    ///
    /// # Errors
    ///
    /// * [`CoreError::RoomOccupied`] - if the room already has an occupant
    /// * [`CoreError::PatientAlreadyRoomed`] - if the patient already
    ///   occupies a room
    /// * [`CoreError::RoomUnderMaintenance`] - if the room is out of
    ///   service
    pub async fn admit(&self, actor: &Actor, room: RoomId, patient: AccountId) -> CoreResult<Room> {
        if !scope::room_access(actor).can_manage() {
            return Err(Self::absent(room));
        }
        let room = self.store.admit(room, patient).await?;
        info!(room = %room.number, patient = %patient, "Admission recorded");
        Ok(room)
    }

    /// Schedules the current occupant's discharge for a future instant.
    ///
    /// # Errors
    ///
    /// * [`CoreError::RoomEmpty`] - if the room has no occupant
    /// * [`CoreError::DischargeTimeNotFuture`] - if `at` is not strictly
    ///   in the future; the room is left untouched
    pub async fn schedule_discharge(
        &self,
        actor: &Actor,
        room: RoomId,
        at: DateTime<Utc>,
    ) -> CoreResult<Room> {
        if !scope::room_access(actor).can_manage() {
            return Err(Self::absent(room));
        }
        if at <= self.clock.now() {
            return Err(CoreError::DischargeTimeNotFuture);
        }
        let room = self.store.set_discharge_schedule(room, at).await?;
        info!(room = %room.number, at = %at, "Discharge scheduled");
        Ok(room)
    }

    /// Discharges the room's occupant immediately.
    ///
    /// Calling this on an empty room is an explicit error, not a silent
    /// no-op - callers are expected to know the state they are acting on.
    ///
    /// # Errors
    ///
    /// * [`CoreError::RoomEmpty`] - if the room has no occupant
    pub async fn discharge_now(&self, actor: &Actor, room: RoomId) -> CoreResult<Room> {
        if !scope::room_access(actor).can_manage() {
            return Err(Self::absent(room));
        }
        let room = self.store.clear_occupancy(room).await?;
        info!(room = %room.number, "Manual discharge applied");
        Ok(room)
    }

    /// Applies every due scheduled discharge; returns how many rooms were
    /// discharged.
    ///
    /// This is the internal path the sweep drives. Unlike
    /// [`discharge_now`](Self::discharge_now) it is tolerant: a room that
    /// stopped matching between scan and conditional write - already
    /// discharged by a concurrent sweep or a manual discharge, or
    /// rescheduled - is skipped, not reported.
    pub async fn sweep(&self) -> CoreResult<usize> {
        let now = self.clock.now();
        let due = self.store.rooms_due_for_discharge(now).await?;
        let mut discharged = 0;
        for room in due {
            // Re-checked at commit time; a concurrent discharge makes this
            // a no-op for the room in question.
            if self
                .store
                .clear_occupancy_if_due(room.id, now)
                .await?
                .is_some()
            {
                discharged += 1;
            }
        }
        if discharged > 0 {
            info!(count = discharged, "Discharge sweep applied");
        } else {
            debug!("Discharge sweep found nothing due");
        }
        Ok(discharged)
    }
}
