//! Medivault Persistence Layer
//!
//! This crate defines the record-store contract the Medivault core requires
//! from durable storage, together with an in-memory backend used for
//! embedding and tests. The contract is small but strict:
//!
//! - **Unique-constraint inserts** - account usernames, invitation tokens,
//!   and room numbers are reserved by the insert itself, never by an
//!   application-side existence check that could race.
//! - **Single-row conditional updates** - the invitation PENDING→USED
//!   transition, room admission, and discharge are compare-and-swap
//!   operations that fail when the stored precondition no longer holds.
//!   Two racing callers therefore resolve at the store: exactly one wins.
//! - **Scope-filtered queries** - profile and record queries take an
//!   access-scope filter value and evaluate it against stored relations, so
//!   an unscoped read is unrepresentable.
//!
//! # Architecture
//!
//! - [`error`] - Error types for all storage operations
//! - [`core`] - The store traits, one per entity family
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```
//! use medivault_model::{Room, RoomType};
//! use medivault_persistence::backends::memory::MemoryBackend;
//! use medivault_persistence::core::RoomStore;
//!
//! # async fn example() -> Result<(), medivault_persistence::error::StorageError> {
//! let store = MemoryBackend::new();
//! let room = store
//!     .insert_room(Room::new("101", RoomType::General, "Cardiology"))
//!     .await?;
//! assert!(store.room(room.id).await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod core;
pub mod error;

pub use error::{StorageError, StorageResult};
