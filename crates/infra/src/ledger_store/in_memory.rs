use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use corebank_core::{AccountNumber, CustomerId, MovementId};
use corebank_ledger::{Account, Movement};

use super::query::Page;
use super::r#trait::{AccountStore, LedgerStore, MovementStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<AccountNumber, Account>,
    movements: Vec<Movement>,
}

/// In-memory ledger store.
///
/// Intended for tests/dev. Not optimized for performance: queries scan.
/// Both record families live behind a single lock, which is what makes
/// `commit_posting` atomic here; a database backend gets the same property
/// from a transaction.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<Inner>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The compare-and-swap at the heart of every account write: the update
    /// applies only when the stored revision equals `expected_revision`, and
    /// the committed record carries `expected_revision + 1`.
    fn cas_account(
        inner: &mut Inner,
        account: &Account,
        expected_revision: u64,
        now: DateTime<Utc>,
    ) -> Result<Account, StoreError> {
        let number = account.account_number();
        let stored = inner
            .accounts
            .get(number)
            .ok_or_else(|| StoreError::NotFound(format!("account {number}")))?;

        if stored.revision() != expected_revision {
            return Err(StoreError::Conflict(format!(
                "account {number}: expected revision {expected_revision}, found {}",
                stored.revision()
            )));
        }

        let committed = account.clone().committed(expected_revision + 1, now);
        inner.accounts.insert(number.clone(), committed.clone());
        Ok(committed)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Storage("lock poisoned".to_string())
}

impl AccountStore for InMemoryLedgerStore {
    fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;

        let number = account.account_number();
        if inner.accounts.contains_key(number) {
            return Err(StoreError::Conflict(format!(
                "account {number} already exists"
            )));
        }

        inner.accounts.insert(number.clone(), account.clone());
        Ok(())
    }

    fn update_account(
        &self,
        account: &Account,
        expected_revision: u64,
    ) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Self::cas_account(&mut inner, account, expected_revision, Utc::now())
    }

    fn find_account(&self, account_number: &AccountNumber) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.accounts.get(account_number).cloned())
    }

    fn find_accounts_by_owner(&self, owner: &CustomerId) -> Result<Vec<Account>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;

        let mut accounts: Vec<Account> = inner
            .accounts
            .values()
            .filter(|a| a.owner_customer_id() == owner)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.account_number().as_str().cmp(b.account_number().as_str()));
        Ok(accounts)
    }

    fn list_accounts(&self, page: Page) -> Result<Vec<Account>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;

        let mut accounts: Vec<Account> = inner.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.account_number().as_str().cmp(b.account_number().as_str()));
        Ok(page.slice(&accounts).to_vec())
    }
}

impl MovementStore for InMemoryLedgerStore {
    fn find_movement(&self, movement_id: &MovementId) -> Result<Option<Movement>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .movements
            .iter()
            .find(|m| m.movement_id() == movement_id)
            .cloned())
    }

    fn find_movements_by_account(
        &self,
        account_number: &AccountNumber,
        page: Page,
    ) -> Result<Vec<Movement>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;

        let mut movements: Vec<Movement> = inner
            .movements
            .iter()
            .filter(|m| m.account_number() == account_number)
            .cloned()
            .collect();
        movements.sort_by_key(|m| std::cmp::Reverse(m.occurred_at()));
        Ok(page.slice(&movements).to_vec())
    }

    fn find_movements_in_range(
        &self,
        account_numbers: &[AccountNumber],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Movement>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;

        let mut movements: Vec<Movement> = inner
            .movements
            .iter()
            .filter(|m| {
                account_numbers.contains(m.account_number())
                    && m.occurred_at() >= from
                    && m.occurred_at() <= to
            })
            .cloned()
            .collect();
        movements.sort_by(|a, b| {
            a.account_number()
                .as_str()
                .cmp(b.account_number().as_str())
                .then(b.occurred_at().cmp(&a.occurred_at()))
        });
        Ok(movements)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn commit_posting(
        &self,
        account: &Account,
        expected_revision: u64,
        movement: &Movement,
    ) -> Result<Account, StoreError> {
        if movement.account_number() != account.account_number() {
            return Err(StoreError::Storage(format!(
                "movement {} targets account {}, commit is for account {}",
                movement.movement_id(),
                movement.account_number(),
                account.account_number()
            )));
        }

        let mut inner = self.inner.write().map_err(poisoned)?;

        if inner
            .movements
            .iter()
            .any(|m| m.movement_id() == movement.movement_id())
        {
            return Err(StoreError::Conflict(format!(
                "movement {} already exists",
                movement.movement_id()
            )));
        }

        // CAS first: a losing writer must leave nothing behind.
        let committed = Self::cas_account(&mut inner, account, expected_revision, Utc::now())?;
        inner.movements.push(movement.clone());
        Ok(committed)
    }
}
