//! Store trait implementations for [`MemoryBackend`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use medivault_model::{
    Account, AccountId, DoctorFilter, DoctorProfile, Invitation, InvitationStatus, InviteToken,
    LabProfile, LabRequest, PatientFilter, PatientProfile, Room, RoomId, RoomStatus, Visit,
    VisitFilter,
};

use crate::core::{AccountStore, InvitationStore, ProfileStore, RecordStore, RoomStore};
use crate::error::{ConstraintError, NotFoundError, PreconditionError, StorageResult};

use super::MemoryBackend;

#[async_trait]
impl AccountStore for MemoryBackend {
    async fn insert_account(&self, account: Account) -> StorageResult<Account> {
        let mut state = self.state.write();
        if state.usernames.contains_key(&account.username) {
            return Err(ConstraintError::UsernameTaken {
                username: account.username,
            }
            .into());
        }
        state
            .usernames
            .insert(account.username.clone(), account.id);
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn account(&self, id: AccountId) -> StorageResult<Option<Account>> {
        Ok(self.state.read().accounts.get(&id).cloned())
    }

    async fn account_by_username(&self, username: &str) -> StorageResult<Option<Account>> {
        let state = self.state.read();
        Ok(state
            .usernames
            .get(username)
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }
}

#[async_trait]
impl InvitationStore for MemoryBackend {
    async fn insert_invitation(&self, invitation: Invitation) -> StorageResult<Invitation> {
        let mut state = self.state.write();
        if state.invitations.contains_key(&invitation.token) {
            return Err(ConstraintError::TokenExists {
                token: invitation.token,
            }
            .into());
        }
        state
            .invitations
            .insert(invitation.token, invitation.clone());
        Ok(invitation)
    }

    async fn invitation(&self, token: InviteToken) -> StorageResult<Option<Invitation>> {
        Ok(self.state.read().invitations.get(&token).cloned())
    }

    async fn consume(&self, token: InviteToken, now: DateTime<Utc>) -> StorageResult<Invitation> {
        let mut state = self.state.write();
        let invitation = state
            .invitations
            .get_mut(&token)
            .ok_or(NotFoundError::Invitation)?;
        if !invitation.is_open(now) {
            return Err(PreconditionError::InvitationNotPending { token }.into());
        }
        invitation.status = InvitationStatus::Used;
        debug!(token = %token, role = %invitation.role(), "Invitation consumed");
        Ok(invitation.clone())
    }

    async fn delete_invitation(&self, token: InviteToken) -> StorageResult<()> {
        let mut state = self.state.write();
        state
            .invitations
            .remove(&token)
            .ok_or(NotFoundError::Invitation)?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryBackend {
    async fn insert_doctor_profile(&self, profile: DoctorProfile) -> StorageResult<DoctorProfile> {
        let mut state = self.state.write();
        if state.doctors.contains_key(&profile.account_id) {
            return Err(ConstraintError::ProfileExists {
                account_id: profile.account_id,
            }
            .into());
        }
        state.doctors.insert(profile.account_id, profile.clone());
        Ok(profile)
    }

    async fn insert_patient_profile(
        &self,
        profile: PatientProfile,
    ) -> StorageResult<PatientProfile> {
        let mut state = self.state.write();
        if state.patients.contains_key(&profile.account_id) {
            return Err(ConstraintError::ProfileExists {
                account_id: profile.account_id,
            }
            .into());
        }
        state.patients.insert(profile.account_id, profile.clone());
        Ok(profile)
    }

    async fn insert_lab_profile(&self, profile: LabProfile) -> StorageResult<LabProfile> {
        let mut state = self.state.write();
        if state.labs.contains_key(&profile.account_id) {
            return Err(ConstraintError::ProfileExists {
                account_id: profile.account_id,
            }
            .into());
        }
        state.labs.insert(profile.account_id, profile.clone());
        Ok(profile)
    }

    async fn lab_profile(&self, id: AccountId) -> StorageResult<Option<LabProfile>> {
        Ok(self.state.read().labs.get(&id).cloned())
    }

    async fn doctor_profile(
        &self,
        id: AccountId,
        filter: DoctorFilter,
    ) -> StorageResult<Option<DoctorProfile>> {
        let state = self.state.read();
        Ok(state
            .doctors
            .get(&id)
            .filter(|profile| state.doctor_visible(profile, filter))
            .cloned())
    }

    async fn patient_profile(
        &self,
        id: AccountId,
        filter: PatientFilter,
    ) -> StorageResult<Option<PatientProfile>> {
        let state = self.state.read();
        Ok(state
            .patients
            .get(&id)
            .filter(|profile| state.patient_visible(profile, filter))
            .cloned())
    }

    async fn list_doctors(&self, filter: DoctorFilter) -> StorageResult<Vec<DoctorProfile>> {
        let state = self.state.read();
        let mut doctors: Vec<_> = state
            .doctors
            .values()
            .filter(|profile| state.doctor_visible(profile, filter))
            .cloned()
            .collect();
        doctors.sort_by_key(|profile| profile.account_id);
        Ok(doctors)
    }

    async fn list_patients(&self, filter: PatientFilter) -> StorageResult<Vec<PatientProfile>> {
        let state = self.state.read();
        let mut patients: Vec<_> = state
            .patients
            .values()
            .filter(|profile| state.patient_visible(profile, filter))
            .cloned()
            .collect();
        patients.sort_by_key(|profile| profile.account_id);
        Ok(patients)
    }

    async fn assign_doctor(
        &self,
        patient: AccountId,
        doctor: AccountId,
    ) -> StorageResult<PatientProfile> {
        let mut state = self.state.write();
        if !state.doctors.contains_key(&doctor) {
            return Err(NotFoundError::DoctorProfile { account_id: doctor }.into());
        }
        let profile = state
            .patients
            .get_mut(&patient)
            .ok_or(NotFoundError::PatientProfile {
                account_id: patient,
            })?;
        profile.assigned_doctors.insert(doctor);
        Ok(profile.clone())
    }
}

#[async_trait]
impl RoomStore for MemoryBackend {
    async fn insert_room(&self, room: Room) -> StorageResult<Room> {
        let mut state = self.state.write();
        if state.room_numbers.contains_key(&room.number) {
            return Err(ConstraintError::RoomNumberExists {
                number: room.number,
            }
            .into());
        }
        state.room_numbers.insert(room.number.clone(), room.id);
        state.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn room(&self, id: RoomId) -> StorageResult<Option<Room>> {
        Ok(self.state.read().rooms.get(&id).cloned())
    }

    async fn list_rooms(&self) -> StorageResult<Vec<Room>> {
        let mut rooms: Vec<_> = self.state.read().rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(rooms)
    }

    async fn admit(&self, room_id: RoomId, patient: AccountId) -> StorageResult<Room> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        // Precondition checks and the write happen under one lock
        // acquisition; a racing admit observes either nothing or the
        // completed admission.
        let room = state
            .rooms
            .get_mut(&room_id)
            .ok_or(NotFoundError::Room { id: room_id })?;
        if room.status == RoomStatus::Maintenance {
            return Err(PreconditionError::RoomUnderMaintenance { room: room_id }.into());
        }
        if room.occupant.is_some() {
            return Err(PreconditionError::RoomOccupied { room: room_id }.into());
        }
        if let Some(occupied_room) = state.occupancy.get(&patient) {
            return Err(PreconditionError::PatientAlreadyRoomed {
                patient,
                occupied_room: *occupied_room,
            }
            .into());
        }

        room.occupant = Some(patient);
        room.scheduled_discharge = None;
        state.occupancy.insert(patient, room_id);
        debug!(room = %room.number, patient = %patient, "Patient admitted");
        Ok(room.clone())
    }

    async fn set_discharge_schedule(
        &self,
        room_id: RoomId,
        at: DateTime<Utc>,
    ) -> StorageResult<Room> {
        let mut state = self.state.write();
        let room = state
            .rooms
            .get_mut(&room_id)
            .ok_or(NotFoundError::Room { id: room_id })?;
        if room.occupant.is_none() {
            return Err(PreconditionError::RoomEmpty { room: room_id }.into());
        }
        room.scheduled_discharge = Some(at);
        Ok(room.clone())
    }

    async fn clear_occupancy(&self, room_id: RoomId) -> StorageResult<Room> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let room = state
            .rooms
            .get_mut(&room_id)
            .ok_or(NotFoundError::Room { id: room_id })?;
        let occupant = room
            .occupant
            .take()
            .ok_or(PreconditionError::RoomEmpty { room: room_id })?;
        room.scheduled_discharge = None;
        state.occupancy.remove(&occupant);
        debug!(room = %room.number, patient = %occupant, "Patient discharged");
        Ok(room.clone())
    }

    async fn clear_occupancy_if_due(
        &self,
        room_id: RoomId,
        now: DateTime<Utc>,
    ) -> StorageResult<Option<Room>> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let Some(room) = state.rooms.get_mut(&room_id) else {
            return Ok(None);
        };
        // The precondition is re-evaluated here, at commit time: a room
        // discharged or rescheduled since the scan simply stops matching.
        let Some(occupant) = room.occupant else {
            return Ok(None);
        };
        match room.scheduled_discharge {
            Some(at) if at <= now => {}
            _ => return Ok(None),
        }
        room.occupant = None;
        room.scheduled_discharge = None;
        state.occupancy.remove(&occupant);
        debug!(room = %room.number, patient = %occupant, "Scheduled discharge applied");
        Ok(Some(room.clone()))
    }

    async fn rooms_due_for_discharge(&self, now: DateTime<Utc>) -> StorageResult<Vec<Room>> {
        let mut due: Vec<_> = self
            .state
            .read()
            .rooms
            .values()
            .filter(|room| room.is_discharge_due(now))
            .cloned()
            .collect();
        due.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(due)
    }
}

#[async_trait]
impl RecordStore for MemoryBackend {
    async fn insert_visit(&self, visit: Visit) -> StorageResult<Visit> {
        self.state.write().visits.push(visit.clone());
        Ok(visit)
    }

    async fn list_visits(&self, filter: VisitFilter) -> StorageResult<Vec<Visit>> {
        let state = self.state.read();
        let mut visits: Vec<_> = state
            .visits
            .iter()
            .filter(|visit| state.visit_visible(visit, filter))
            .cloned()
            .collect();
        visits.sort_by(|a, b| b.visit_date.cmp(&a.visit_date));
        Ok(visits)
    }

    async fn insert_lab_request(&self, request: LabRequest) -> StorageResult<LabRequest> {
        self.state.write().lab_requests.push(request.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::TimeDelta;
    use medivault_model::{
        Demographics, DoctorOnboarding, InvitationStatus, OnboardingPayload, PasswordHash, Role,
        RoomType,
    };

    use crate::error::StorageError;

    use super::*;

    fn account(username: &str, role: Role) -> Account {
        Account {
            id: AccountId::new(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: PasswordHash::new("hash"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    fn invitation(expires_at: Option<DateTime<Utc>>) -> Invitation {
        Invitation {
            token: InviteToken::new(),
            email: "invitee@example.com".to_string(),
            payload: OnboardingPayload::Doctor(DoctorOnboarding::default()),
            issued_by: AccountId::new(),
            status: InvitationStatus::Pending,
            created_at: Utc::now(),
            expires_at,
        }
    }

    fn patient_profile(account_id: AccountId, doctors: &[AccountId]) -> PatientProfile {
        PatientProfile {
            account_id,
            assigned_doctors: BTreeSet::from_iter(doctors.iter().copied()),
            demographics: Demographics::default(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryBackend::new();
        store.insert_account(account("smith", Role::Doctor)).await.unwrap();
        let err = store
            .insert_account(account("smith", Role::Patient))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Constraint(ConstraintError::UsernameTaken { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_username_reservation_has_one_winner() {
        let store = MemoryBackend::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert_account(account("shared", Role::Patient)).await
            }));
        }
        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_consume_is_exactly_once() {
        let store = MemoryBackend::new();
        let inv = store.insert_invitation(invitation(None)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let token = inv.token;
            handles.push(tokio::spawn(
                async move { store.consume(token, Utc::now()).await },
            ));
        }
        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(StorageError::Precondition(
                    PreconditionError::InvitationNotPending { .. },
                )) => {}
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_consume_rejects_expired_without_rewriting_status() {
        let store = MemoryBackend::new();
        let now = Utc::now();
        let inv = store
            .insert_invitation(invitation(Some(now - TimeDelta::hours(1))))
            .await
            .unwrap();

        let err = store.consume(inv.token, now).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Precondition(PreconditionError::InvitationNotPending { .. })
        ));

        // The stored row still reads Pending; expiry is derived, not persisted.
        let stored = store.invitation(inv.token).await.unwrap().unwrap();
        assert_eq!(stored.status, InvitationStatus::Pending);
    }

    #[tokio::test]
    async fn test_admit_sets_occupant_and_clears_schedule() {
        let store = MemoryBackend::new();
        let room = store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        let patient = AccountId::new();

        let admitted = store.admit(room.id, patient).await.unwrap();
        assert_eq!(admitted.occupant, Some(patient));
        assert!(admitted.scheduled_discharge.is_none());
    }

    #[tokio::test]
    async fn test_admit_occupied_room_fails() {
        let store = MemoryBackend::new();
        let room = store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        store.admit(room.id, AccountId::new()).await.unwrap();

        let err = store.admit(room.id, AccountId::new()).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Precondition(PreconditionError::RoomOccupied { .. })
        ));
    }

    #[tokio::test]
    async fn test_admit_roomed_patient_fails_and_keeps_first_room() {
        let store = MemoryBackend::new();
        let first = store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        let second = store
            .insert_room(Room::new("102", RoomType::Private, "Neurology"))
            .await
            .unwrap();
        let patient = AccountId::new();
        store.admit(first.id, patient).await.unwrap();

        let err = store.admit(second.id, patient).await.unwrap_err();
        match err {
            StorageError::Precondition(PreconditionError::PatientAlreadyRoomed {
                occupied_room,
                ..
            }) => assert_eq!(occupied_room, first.id),
            other => panic!("unexpected error: {}", other),
        }
        let first = store.room(first.id).await.unwrap().unwrap();
        assert_eq!(first.occupant, Some(patient));
    }

    #[tokio::test]
    async fn test_concurrent_admissions_of_one_patient_win_once() {
        let store = MemoryBackend::new();
        let patient = AccountId::new();
        let mut rooms = Vec::new();
        for number in 101..109 {
            rooms.push(
                store
                    .insert_room(Room::new(
                        number.to_string(),
                        RoomType::General,
                        "General Surgery",
                    ))
                    .await
                    .unwrap(),
            );
        }

        let mut handles = Vec::new();
        for room in &rooms {
            let store = store.clone();
            let room_id = room.id;
            handles.push(tokio::spawn(async move { store.admit(room_id, patient).await }));
        }
        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_admit_maintenance_room_fails() {
        let store = MemoryBackend::new();
        let mut room = Room::new("101", RoomType::General, "Cardiology");
        room.status = RoomStatus::Maintenance;
        let room = store.insert_room(room).await.unwrap();

        let err = store.admit(room.id, AccountId::new()).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Precondition(PreconditionError::RoomUnderMaintenance { .. })
        ));
    }

    #[tokio::test]
    async fn test_clear_occupancy_frees_patient_for_readmission() {
        let store = MemoryBackend::new();
        let first = store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        let second = store
            .insert_room(Room::new("102", RoomType::Icu, "Cardiology"))
            .await
            .unwrap();
        let patient = AccountId::new();

        store.admit(first.id, patient).await.unwrap();
        store.clear_occupancy(first.id).await.unwrap();
        // The occupancy index entry is gone with the discharge.
        store.admit(second.id, patient).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_occupancy_on_empty_room_fails() {
        let store = MemoryBackend::new();
        let room = store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        let err = store.clear_occupancy(room.id).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Precondition(PreconditionError::RoomEmpty { .. })
        ));
    }

    #[tokio::test]
    async fn test_clear_if_due_skips_non_matching_rooms() {
        let store = MemoryBackend::new();
        let now = Utc::now();
        let room = store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();

        // Empty room: nothing to do, no error.
        assert!(store.clear_occupancy_if_due(room.id, now).await.unwrap().is_none());

        // Occupied but not yet due.
        store.admit(room.id, AccountId::new()).await.unwrap();
        store
            .set_discharge_schedule(room.id, now + TimeDelta::hours(2))
            .await
            .unwrap();
        assert!(store.clear_occupancy_if_due(room.id, now).await.unwrap().is_none());

        // Due: discharged, and a second sweep finds nothing.
        let later = now + TimeDelta::hours(3);
        let cleared = store.clear_occupancy_if_due(room.id, later).await.unwrap();
        assert!(cleared.is_some());
        assert!(store.clear_occupancy_if_due(room.id, later).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rooms_due_for_discharge_requires_elapsed_schedule() {
        let store = MemoryBackend::new();
        let now = Utc::now();
        let due = store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        let not_due = store
            .insert_room(Room::new("102", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        store.admit(due.id, AccountId::new()).await.unwrap();
        store.admit(not_due.id, AccountId::new()).await.unwrap();
        store
            .set_discharge_schedule(due.id, now - TimeDelta::minutes(1))
            .await
            .unwrap();
        store
            .set_discharge_schedule(not_due.id, now + TimeDelta::hours(1))
            .await
            .unwrap();

        let rooms = store.rooms_due_for_discharge(now).await.unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, due.id);
    }

    #[tokio::test]
    async fn test_duplicate_room_number_rejected() {
        let store = MemoryBackend::new();
        store
            .insert_room(Room::new("101", RoomType::General, "Cardiology"))
            .await
            .unwrap();
        let err = store
            .insert_room(Room::new("101", RoomType::Icu, "Neurology"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Constraint(ConstraintError::RoomNumberExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_patient_filters_follow_relations() {
        let store = MemoryBackend::new();
        let doctor = AccountId::new();
        let lab = AccountId::new();
        let assigned = AccountId::new();
        let other = AccountId::new();

        store
            .insert_doctor_profile(DoctorProfile {
                account_id: doctor,
                specialization: "Cardiology".to_string(),
            })
            .await
            .unwrap();
        store
            .insert_patient_profile(patient_profile(assigned, &[doctor]))
            .await
            .unwrap();
        store
            .insert_patient_profile(patient_profile(other, &[]))
            .await
            .unwrap();
        store
            .insert_lab_request(LabRequest {
                id: medivault_model::LabRequestId::new(),
                patient: other,
                lab,
                requested_at: Utc::now(),
            })
            .await
            .unwrap();

        let of_doctor = store.list_patients(PatientFilter::OfDoctor(doctor)).await.unwrap();
        assert_eq!(of_doctor.len(), 1);
        assert_eq!(of_doctor[0].account_id, assigned);

        let at_lab = store.list_patients(PatientFilter::WithRequestAt(lab)).await.unwrap();
        assert_eq!(at_lab.len(), 1);
        assert_eq!(at_lab[0].account_id, other);

        assert!(store.list_patients(PatientFilter::None).await.unwrap().is_empty());

        // A filtered point read treats an out-of-scope profile as absent.
        assert!(store
            .patient_profile(other, PatientFilter::OfDoctor(doctor))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_doctor_filter_assigned_to_patient() {
        let store = MemoryBackend::new();
        let doctor = AccountId::new();
        let stranger = AccountId::new();
        let patient = AccountId::new();

        for (id, specialization) in [(doctor, "Cardiology"), (stranger, "Oncology")] {
            store
                .insert_doctor_profile(DoctorProfile {
                    account_id: id,
                    specialization: specialization.to_string(),
                })
                .await
                .unwrap();
        }
        store
            .insert_patient_profile(patient_profile(patient, &[doctor]))
            .await
            .unwrap();

        let visible = store
            .list_doctors(DoctorFilter::AssignedTo(patient))
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].account_id, doctor);
    }

    #[tokio::test]
    async fn test_assign_doctor_requires_both_profiles() {
        let store = MemoryBackend::new();
        let doctor = AccountId::new();
        let patient = AccountId::new();

        let err = store.assign_doctor(patient, doctor).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::NotFound(NotFoundError::DoctorProfile { .. })
        ));

        store
            .insert_doctor_profile(DoctorProfile {
                account_id: doctor,
                specialization: String::new(),
            })
            .await
            .unwrap();
        let err = store.assign_doctor(patient, doctor).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::NotFound(NotFoundError::PatientProfile { .. })
        ));

        store
            .insert_patient_profile(patient_profile(patient, &[]))
            .await
            .unwrap();
        let profile = store.assign_doctor(patient, doctor).await.unwrap();
        assert!(profile.is_assigned(doctor));
    }
}
