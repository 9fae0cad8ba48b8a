//! Store traits and abstractions.
//!
//! Each entity family gets its own trait so components can name exactly the
//! storage capabilities they require:
//!
//! - [`AccountStore`] - accounts with username uniqueness
//! - [`InvitationStore`] - invitations with the PENDING→USED compare-and-swap
//! - [`ProfileStore`] - role profiles with scope-filtered queries
//! - [`RoomStore`] - rooms with conditional admission and discharge
//! - [`RecordStore`] - visits and lab requests
//!
//! A backend implements all of them; components bound only the subset they
//! touch.

mod accounts;
mod invitations;
mod profiles;
mod records;
mod rooms;

pub use accounts::AccountStore;
pub use invitations::InvitationStore;
pub use profiles::ProfileStore;
pub use records::RecordStore;
pub use rooms::RoomStore;
