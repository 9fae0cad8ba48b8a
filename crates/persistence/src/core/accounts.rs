//! Account storage trait.

use async_trait::async_trait;

use medivault_model::{Account, AccountId};

use crate::error::StorageResult;

/// Storage for accounts.
///
/// The username is the one application-level key with a hard uniqueness
/// requirement: it is reserved by [`insert_account`](Self::insert_account)
/// itself, atomically with the row becoming visible. Callers must not
/// pre-check availability - two concurrent completions asking for the same
/// username would both pass such a check.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account, reserving its username.
    ///
    /// # Errors
    ///
    /// * `StorageError::Constraint(UsernameTaken)` - if the username is
    ///   already reserved, including by a concurrent insert
    async fn insert_account(&self, account: Account) -> StorageResult<Account>;

    /// Reads an account by id. Returns `None` when absent.
    async fn account(&self, id: AccountId) -> StorageResult<Option<Account>>;

    /// Reads an account by its unique username. Returns `None` when absent.
    async fn account_by_username(&self, username: &str) -> StorageResult<Option<Account>>;
}
