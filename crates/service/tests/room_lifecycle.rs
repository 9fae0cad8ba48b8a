//! Room occupancy lifecycle scenarios.

mod common;

use chrono::TimeDelta;

use medivault_service::{Clock, CoreError};

use common::Harness;

#[tokio::test]
async fn test_admit_then_second_admission_rejected() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let first = harness.seed_patient("patjones", &[]).await;
    let second = harness.seed_patient("patbrown", &[]).await;
    let room = harness.seed_room("101").await;

    harness
        .rooms
        .admit(&doctor, room.id, first.account_id)
        .await
        .unwrap();

    let err = harness
        .rooms
        .admit(&doctor, room.id, second.account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::RoomOccupied { .. }));
}

#[tokio::test]
async fn test_patient_occupies_at_most_one_room() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let patient = harness.seed_patient("patjones", &[]).await;
    let first = harness.seed_room("101").await;
    let second = harness.seed_room("102").await;

    harness
        .rooms
        .admit(&doctor, first.id, patient.account_id)
        .await
        .unwrap();

    let err = harness
        .rooms
        .admit(&doctor, second.id, patient.account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::PatientAlreadyRoomed { .. }));

    // The first admission is untouched by the failed second one.
    let room = harness.rooms.room(&doctor, first.id).await.unwrap().unwrap();
    assert_eq!(room.occupant, Some(patient.account_id));
}

#[tokio::test]
async fn test_schedule_discharge_requires_future_time() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let patient = harness.seed_patient("patjones", &[]).await;
    let room = harness.seed_room("101").await;
    harness
        .rooms
        .admit(&doctor, room.id, patient.account_id)
        .await
        .unwrap();

    for at in [
        harness.clock.now(),
        harness.clock.now() - TimeDelta::minutes(5),
    ] {
        let err = harness
            .rooms
            .schedule_discharge(&doctor, room.id, at)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DischargeTimeNotFuture));
    }

    // The room is unchanged by the rejected schedules.
    let stored = harness.rooms.room(&doctor, room.id).await.unwrap().unwrap();
    assert_eq!(stored.occupant, Some(patient.account_id));
    assert!(stored.scheduled_discharge.is_none());
}

#[tokio::test]
async fn test_schedule_discharge_on_empty_room_fails() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let room = harness.seed_room("101").await;

    let err = harness
        .rooms
        .schedule_discharge(&doctor, room.id, harness.clock.now() + TimeDelta::hours(1))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::RoomEmpty { .. }));
}

#[tokio::test]
async fn test_discharge_now_on_empty_room_is_an_error() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let room = harness.seed_room("101").await;

    let err = harness
        .rooms
        .discharge_now(&doctor, room.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::RoomEmpty { .. }));
}

#[tokio::test]
async fn test_sweep_applies_elapsed_schedule() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let patient = harness.seed_patient("patjones", &[]).await;
    let room = harness.seed_room("101").await;

    harness
        .rooms
        .admit(&doctor, room.id, patient.account_id)
        .await
        .unwrap();
    harness
        .rooms
        .schedule_discharge(
            &doctor,
            room.id,
            harness.clock.now() + TimeDelta::seconds(1),
        )
        .await
        .unwrap();

    // Not due yet: the sweep leaves the room alone.
    assert_eq!(harness.rooms.sweep().await.unwrap(), 0);

    harness.clock.advance(TimeDelta::seconds(2));
    assert_eq!(harness.rooms.sweep().await.unwrap(), 1);

    let stored = harness.rooms.room(&doctor, room.id).await.unwrap().unwrap();
    assert!(stored.occupant.is_none());
    assert!(stored.scheduled_discharge.is_none());

    // The discharged patient can be admitted elsewhere.
    let other = harness.seed_room("102").await;
    harness
        .rooms
        .admit(&doctor, other.id, patient.account_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_manual_discharge_clears_schedule_for_next_admission() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let patient = harness.seed_patient("patjones", &[]).await;
    let next = harness.seed_patient("patbrown", &[]).await;
    let room = harness.seed_room("101").await;

    harness
        .rooms
        .admit(&doctor, room.id, patient.account_id)
        .await
        .unwrap();
    harness
        .rooms
        .schedule_discharge(&doctor, room.id, harness.clock.now() + TimeDelta::hours(4))
        .await
        .unwrap();

    let discharged = harness.rooms.discharge_now(&doctor, room.id).await.unwrap();
    assert!(discharged.occupant.is_none());
    assert!(discharged.scheduled_discharge.is_none());

    // A stale schedule never leaks into the next occupancy.
    let readmitted = harness
        .rooms
        .admit(&doctor, room.id, next.account_id)
        .await
        .unwrap();
    assert_eq!(readmitted.occupant, Some(next.account_id));
    assert!(readmitted.scheduled_discharge.is_none());
}

#[tokio::test]
async fn test_maintenance_room_rejects_admission() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let patient = harness.seed_patient("patjones", &[]).await;
    let room = harness.seed_maintenance_room("101").await;

    let err = harness
        .rooms
        .admit(&doctor, room.id, patient.account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::RoomUnderMaintenance { .. }));
}

#[tokio::test]
async fn test_rooms_are_invisible_to_patients_and_labs() {
    let harness = Harness::new();
    let doctor = harness.seed_doctor("drsmith", "Cardiology").await;
    let patient = harness.seed_patient("patjones", &[]).await;
    let lab = harness.seed_lab("xray", "XRay Lab").await;
    let room = harness.seed_room("101").await;

    for actor in [&patient, &lab] {
        assert!(harness.rooms.list_rooms(actor).await.unwrap().is_empty());
        assert!(harness.rooms.room(actor, room.id).await.unwrap().is_none());

        // A mutation attempt reads exactly like a nonexistent room.
        let err = harness
            .rooms
            .admit(actor, room.id, patient.account_id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }

    // Doctors and admins both see and manage.
    assert_eq!(harness.rooms.list_rooms(&doctor).await.unwrap().len(), 1);
    let admin = harness.seed_admin("root").await;
    harness
        .rooms
        .admit(&admin, room.id, patient.account_id)
        .await
        .unwrap();
}
