use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use corebank_core::{AccountNumber, CustomerId, MovementId};
use corebank_ledger::{Account, Movement};

use super::query::Page;

/// Store operation error.
///
/// `Conflict` and `NotFound` are distinct on purpose: a caller retries a
/// conflict against fresh state, but corrects its input on not-found.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Compare-and-swap failure: the stored revision no longer matches the
    /// expected one (or a uniqueness constraint was violated on insert).
    #[error("optimistic concurrency check failed: {0}")]
    Conflict(String),

    /// The addressed record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Backend failure (IO, lock poisoning, connectivity).
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Persistence contract for accounts.
///
/// `update` is an explicit compare-and-swap on `revision`: the write is
/// applied only if the stored revision equals `expected_revision`, and the
/// store assigns `revision = expected_revision + 1` plus a fresh
/// `updated_at`. Zero matching records with the account present means a
/// concurrent writer won; it is reported as [`StoreError::Conflict`], never
/// silently overwritten. The revision discipline is a visible contract of
/// this trait, not hidden framework behavior.
pub trait AccountStore: Send + Sync {
    /// Persist a new account. Fails with `Conflict` if the account number is
    /// already taken.
    fn insert_account(&self, account: &Account) -> Result<(), StoreError>;

    /// Compare-and-swap update; returns the committed account state (with the
    /// advanced revision).
    fn update_account(
        &self,
        account: &Account,
        expected_revision: u64,
    ) -> Result<Account, StoreError>;

    fn find_account(&self, account_number: &AccountNumber) -> Result<Option<Account>, StoreError>;

    /// All accounts owned by a customer (active and inactive), ordered by
    /// account number.
    fn find_accounts_by_owner(&self, owner: &CustomerId) -> Result<Vec<Account>, StoreError>;

    /// Page through all accounts, ordered by account number.
    fn list_accounts(&self, page: Page) -> Result<Vec<Account>, StoreError>;
}

/// Persistence contract for movements (append-only: movements are written
/// solely through [`LedgerStore::commit_posting`] and never change after).
pub trait MovementStore: Send + Sync {
    fn find_movement(&self, movement_id: &MovementId) -> Result<Option<Movement>, StoreError>;

    /// Movements of one account ordered by `occurred_at` descending.
    fn find_movements_by_account(
        &self,
        account_number: &AccountNumber,
        page: Page,
    ) -> Result<Vec<Movement>, StoreError>;

    /// Movements of the given accounts with `occurred_at` in `[from, to]`
    /// inclusive, ordered by account number, then `occurred_at` descending.
    fn find_movements_in_range(
        &self,
        account_numbers: &[AccountNumber],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Movement>, StoreError>;
}

/// Combined store with the atomic posting commit.
///
/// `commit_posting` persists the movement and the account update as ONE unit
/// of work under the account's revision CAS: a losing concurrent writer
/// observes `Conflict` with nothing persisted, and a crash between the two
/// records is impossible. This is the ledger's only multi-record write.
pub trait LedgerStore: AccountStore + MovementStore {
    fn commit_posting(
        &self,
        account: &Account,
        expected_revision: u64,
        movement: &Movement,
    ) -> Result<Account, StoreError>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        (**self).insert_account(account)
    }

    fn update_account(
        &self,
        account: &Account,
        expected_revision: u64,
    ) -> Result<Account, StoreError> {
        (**self).update_account(account, expected_revision)
    }

    fn find_account(&self, account_number: &AccountNumber) -> Result<Option<Account>, StoreError> {
        (**self).find_account(account_number)
    }

    fn find_accounts_by_owner(&self, owner: &CustomerId) -> Result<Vec<Account>, StoreError> {
        (**self).find_accounts_by_owner(owner)
    }

    fn list_accounts(&self, page: Page) -> Result<Vec<Account>, StoreError> {
        (**self).list_accounts(page)
    }
}

impl<S> MovementStore for Arc<S>
where
    S: MovementStore + ?Sized,
{
    fn find_movement(&self, movement_id: &MovementId) -> Result<Option<Movement>, StoreError> {
        (**self).find_movement(movement_id)
    }

    fn find_movements_by_account(
        &self,
        account_number: &AccountNumber,
        page: Page,
    ) -> Result<Vec<Movement>, StoreError> {
        (**self).find_movements_by_account(account_number, page)
    }

    fn find_movements_in_range(
        &self,
        account_numbers: &[AccountNumber],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Movement>, StoreError> {
        (**self).find_movements_in_range(account_numbers, from, to)
    }
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn commit_posting(
        &self,
        account: &Account,
        expected_revision: u64,
        movement: &Movement,
    ) -> Result<Account, StoreError> {
        (**self).commit_posting(account, expected_revision, movement)
    }
}
