//! Service test harness.
//!
//! Wires a fresh in-memory backend, a manually-advanced clock, and every
//! core component into one struct, plus seeding helpers for the accounts
//! and rooms the scenarios need.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use medivault_model::{
    Account, AccountId, Demographics, DoctorProfile, LabProfile, NewAccount, PasswordHash,
    PatientProfile, Role, Room, RoomStatus, RoomType,
};
use medivault_persistence::backends::memory::MemoryBackend;
use medivault_persistence::core::{AccountStore, ProfileStore, RoomStore};
use medivault_service::{
    AccountProvisioner, Actor, Clock, InvitationLedger, ManualClock, NotificationError,
    NotificationSender, ProfileDirectory, RoomLifecycleManager, ServiceConfig,
};

/// A sender that records every delivery and succeeds.
#[derive(Debug, Default)]
pub struct RecordingSender {
    /// `(recipient, setup_url)` pairs in delivery order.
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, recipient: &str, setup_url: &str) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .push((recipient.to_string(), setup_url.to_string()));
        Ok(())
    }
}

/// A sender that records the attempted delivery, then fails it.
#[derive(Debug, Default)]
pub struct FailingSender {
    /// Setup URLs whose delivery was refused.
    pub attempted: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationSender for FailingSender {
    async fn send(&self, _recipient: &str, setup_url: &str) -> Result<(), NotificationError> {
        self.attempted.lock().push(setup_url.to_string());
        Err(NotificationError::new("smtp connection refused"))
    }
}

/// Everything a scenario needs, sharing one backend and one clock.
pub struct Harness {
    pub store: Arc<MemoryBackend>,
    pub clock: ManualClock,
    pub config: Arc<ServiceConfig>,
    pub sender: Arc<RecordingSender>,
    pub ledger: InvitationLedger<MemoryBackend, RecordingSender, ManualClock>,
    pub provisioner: AccountProvisioner<MemoryBackend, ManualClock>,
    pub rooms: RoomLifecycleManager<MemoryBackend, ManualClock>,
    pub directory: ProfileDirectory<MemoryBackend, ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryBackend::new());
        let clock = ManualClock::at(Utc::now());
        let config = Arc::new(ServiceConfig::for_testing());
        let sender = Arc::new(RecordingSender::default());
        let ledger = InvitationLedger::new(
            store.clone(),
            sender.clone(),
            clock.clone(),
            config.clone(),
        );
        let provisioner = AccountProvisioner::new(store.clone(), clock.clone());
        let rooms = RoomLifecycleManager::new(store.clone(), clock.clone());
        let directory = ProfileDirectory::new(store.clone(), clock.clone());
        Self {
            store,
            clock,
            config,
            sender,
            ledger,
            provisioner,
            rooms,
            directory,
        }
    }

    /// A ledger sharing this harness's state but with a failing sender.
    pub fn failing_ledger(
        &self,
    ) -> (
        InvitationLedger<MemoryBackend, FailingSender, ManualClock>,
        Arc<FailingSender>,
    ) {
        let sender = Arc::new(FailingSender::default());
        let ledger = InvitationLedger::new(
            self.store.clone(),
            sender.clone(),
            self.clock.clone(),
            self.config.clone(),
        );
        (ledger, sender)
    }

    /// Inserts an account with the given role and returns its actor.
    pub async fn seed_account(&self, username: &str, role: Role) -> Actor {
        let account = Account {
            id: AccountId::new(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: PasswordHash::new("hash"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
            created_at: self.clock.now(),
        };
        let account = self.store.insert_account(account).await.unwrap();
        Actor::from(&account)
    }

    pub async fn seed_admin(&self, username: &str) -> Actor {
        self.seed_account(username, Role::Admin).await
    }

    /// Inserts a doctor account plus profile.
    pub async fn seed_doctor(&self, username: &str, specialization: &str) -> Actor {
        let actor = self.seed_account(username, Role::Doctor).await;
        self.store
            .insert_doctor_profile(DoctorProfile {
                account_id: actor.account_id,
                specialization: specialization.to_string(),
            })
            .await
            .unwrap();
        actor
    }

    /// Inserts a patient account plus profile with the given assignments.
    pub async fn seed_patient(&self, username: &str, doctors: &[AccountId]) -> Actor {
        let actor = self.seed_account(username, Role::Patient).await;
        self.store
            .insert_patient_profile(PatientProfile {
                account_id: actor.account_id,
                assigned_doctors: BTreeSet::from_iter(doctors.iter().copied()),
                demographics: Demographics::default(),
            })
            .await
            .unwrap();
        actor
    }

    /// Inserts a lab account plus profile.
    pub async fn seed_lab(&self, username: &str, name: &str) -> Actor {
        let actor = self.seed_account(username, Role::Lab).await;
        self.store
            .insert_lab_profile(LabProfile {
                account_id: actor.account_id,
                name: name.to_string(),
                address: "123 Health St".to_string(),
            })
            .await
            .unwrap();
        actor
    }

    /// Inserts an active general room with the given number.
    pub async fn seed_room(&self, number: &str) -> Room {
        self.store
            .insert_room(Room::new(number, RoomType::General, "General Surgery"))
            .await
            .unwrap()
    }

    /// Inserts a room that is out of service.
    pub async fn seed_maintenance_room(&self, number: &str) -> Room {
        let mut room = Room::new(number, RoomType::General, "General Surgery");
        room.status = RoomStatus::Maintenance;
        self.store.insert_room(room).await.unwrap()
    }
}

/// Setup credentials for completing an invitation.
pub fn new_account(username: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        password: PasswordHash::new("hash"),
        first_name: "New".to_string(),
        last_name: "User".to_string(),
    }
}
