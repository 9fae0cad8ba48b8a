//! Medivault Core Service
//!
//! The operation layer of the Medivault hospital records core. It owns the
//! three concerns with nontrivial state and failure modes:
//!
//! - **Invitation lifecycle** - [`InvitationLedger`] issues single-use
//!   tokens, [`AccountProvisioner`] turns a completed invitation into an
//!   account plus the matching role profile.
//! - **Role-scoped visibility** - [`scope`] maps each actor to the filter
//!   values every repository query requires; [`ProfileDirectory`] is the
//!   scope-enforced read/create surface over profiles and records.
//! - **Room occupancy** - [`RoomLifecycleManager`] admits and discharges
//!   through conditional writes; [`DischargeScheduler`] sweeps elapsed
//!   scheduled discharges in the background.
//!
//! Transport, persistence technology, password hashing, and mail delivery
//! are collaborator concerns: the core takes a record store implementing
//! the `medivault-persistence` traits, a [`NotificationSender`], and a
//! [`Clock`], and exposes typed operations over them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use medivault_model::{OnboardingPayload, PatientOnboarding, Role};
//! use medivault_persistence::backends::memory::MemoryBackend;
//! use medivault_service::{
//!     Actor, InvitationLedger, ServiceConfig, SystemClock, TracingSender,
//! };
//!
//! # async fn example() -> Result<(), medivault_service::CoreError> {
//! let store = Arc::new(MemoryBackend::new());
//! let config = Arc::new(ServiceConfig::default());
//! let ledger = InvitationLedger::new(
//!     store,
//!     Arc::new(TracingSender),
//!     SystemClock,
//!     config.clone(),
//! );
//!
//! let admin = Actor::new(medivault_model::AccountId::new(), Role::Admin);
//! let invitation = ledger
//!     .issue(
//!         "patient@example.com",
//!         OnboardingPayload::Patient(PatientOnboarding::default()),
//!         &admin,
//!         Some(config.default_invitation_ttl()),
//!     )
//!     .await?;
//! let preview = ledger.peek(invitation.token).await?;
//! assert_eq!(preview.role, Role::Patient);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod invitations;
pub mod notify;
pub mod provisioning;
pub mod rooms;
pub mod scheduler;
pub mod scope;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ServiceConfig;
pub use directory::ProfileDirectory;
pub use error::{CoreError, CoreResult};
pub use invitations::InvitationLedger;
pub use notify::{NotificationError, NotificationSender, TracingSender};
pub use provisioning::{AccountProvisioner, CompletionFields};
pub use rooms::RoomLifecycleManager;
pub use scheduler::{DischargeScheduler, SchedulerHandle};
pub use scope::Actor;

/// Initializes tracing with an env-filter, falling back to the given level
/// for this crate's spans when `RUST_LOG` is unset.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("medivault_service={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
