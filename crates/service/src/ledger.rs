//! Balance-changing orchestration (the transaction boundary).

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use corebank_core::money;
use corebank_core::{AccountNumber, CustomerId, LedgerError, LedgerResult, MovementId};
use corebank_events::{BestEffortPublisher, EventTransport};
use corebank_identity::{CustomerDirectory, CustomerProfile, IdentityError};
use corebank_infra::{LedgerStore, Page, StoreError};
use corebank_ledger::{Account, AccountEvent, AccountType, Movement, MovementKind, strategy};

/// Caller-mutable account fields. Everything else (`account_number`,
/// `opening_balance`, `current_balance`, `revision`) is managed internally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub account_type: Option<AccountType>,
    pub active: Option<bool>,
}

/// The single orchestration point for all balance-changing operations.
///
/// Writes follow one shape: load fresh state, decide (pure domain logic),
/// persist under the revision compare-and-swap, then announce lifecycle
/// changes best-effort. A concurrency loser gets
/// [`LedgerError::ConcurrentModification`] and retries from a fresh read;
/// the service never retries internally and never applies a stale delta.
#[derive(Debug)]
pub struct LedgerService<S, D, T> {
    store: S,
    directory: D,
    publisher: BestEffortPublisher<T>,
}

impl<S, D, T> LedgerService<S, D, T>
where
    S: LedgerStore,
    D: CustomerDirectory,
    T: EventTransport<AccountEvent>,
{
    pub fn new(store: S, directory: D, transport: T) -> Self {
        Self {
            store,
            directory,
            publisher: BestEffortPublisher::new(transport),
        }
    }

    /// Open an account for a directory-resolved, active customer.
    ///
    /// The directory call is bounded by the implementation's timeout; an
    /// unreachable directory surfaces as `DependencyUnavailable` and no
    /// account is created.
    pub fn create_account(
        &self,
        owner: CustomerId,
        account_type: AccountType,
        opening_balance: Decimal,
    ) -> LedgerResult<Account> {
        debug!(owner = %owner, %account_type, "creating account");

        let opening_balance = money::scale2(opening_balance);
        if opening_balance < Decimal::ZERO {
            return Err(LedgerError::validation(
                "opening balance must not be negative",
            ));
        }

        self.resolve_active_customer(&owner)?;

        let account = Account::open(owner, account_type, opening_balance, Utc::now());
        self.store
            .insert_account(&account)
            .map_err(|e| map_store_error(e, account.account_number()))?;

        self.publisher.publish(AccountEvent::Opened {
            account_number: account.account_number().clone(),
            owner_customer_id: account.owner_customer_id().clone(),
            account_type: account.account_type(),
            opening_balance: account.opening_balance(),
            occurred_at: account.created_at(),
        });

        info!(account_number = %account.account_number(), "account created");
        Ok(account)
    }

    /// Post a deposit or withdrawal.
    ///
    /// The movement and the account update commit as one atomic unit; either
    /// both are visible afterwards or neither is. Movement posting publishes
    /// no event; only account lifecycle changes are announced.
    pub fn post_movement(
        &self,
        account_number: &AccountNumber,
        kind: MovementKind,
        value: Decimal,
        description: Option<String>,
    ) -> LedgerResult<Movement> {
        debug!(%account_number, %kind, %value, "posting movement");

        let value = money::scale2(value);
        let mut account = self.load_account(account_number)?;
        let expected_revision = account.revision();

        let movement = strategy::post(&mut account, kind, value, description, Utc::now())?;

        self.store
            .commit_posting(&account, expected_revision, &movement)
            .map_err(|e| map_store_error(e, account_number))?;

        info!(
            movement_id = %movement.movement_id(),
            %kind,
            balance_after = %movement.balance_after(),
            "movement posted"
        );
        Ok(movement)
    }

    /// Change the caller-mutable fields under the revision CAS.
    pub fn update_account(
        &self,
        account_number: &AccountNumber,
        update: AccountUpdate,
    ) -> LedgerResult<Account> {
        debug!(%account_number, ?update, "updating account");

        let mut account = self.load_account(account_number)?;
        let expected_revision = account.revision();

        if let Some(account_type) = update.account_type {
            account.set_account_type(account_type);
        }
        if let Some(active) = update.active {
            account.set_active(active);
        }

        let committed = self
            .store
            .update_account(&account, expected_revision)
            .map_err(|e| map_store_error(e, account_number))?;

        self.publisher.publish(AccountEvent::Updated {
            account_number: committed.account_number().clone(),
            account_type: committed.account_type(),
            active: committed.is_active(),
            occurred_at: committed.updated_at(),
        });

        info!(%account_number, "account updated");
        Ok(committed)
    }

    /// Soft-delete: the account stops accepting movements but keeps its
    /// history. Movements are never touched.
    pub fn deactivate_account(&self, account_number: &AccountNumber) -> LedgerResult<Account> {
        self.update_account(
            account_number,
            AccountUpdate {
                account_type: None,
                active: Some(false),
            },
        )
    }

    pub fn account(&self, account_number: &AccountNumber) -> LedgerResult<Account> {
        self.load_account(account_number)
    }

    pub fn accounts(&self, page: Page) -> LedgerResult<Vec<Account>> {
        self.store
            .list_accounts(page)
            .map_err(|e| LedgerError::dependency_unavailable(e.to_string()))
    }

    pub fn accounts_for_customer(&self, owner: &CustomerId) -> LedgerResult<Vec<Account>> {
        self.store
            .find_accounts_by_owner(owner)
            .map_err(|e| LedgerError::dependency_unavailable(e.to_string()))
    }

    pub fn movement(&self, movement_id: &MovementId) -> LedgerResult<Movement> {
        self.store
            .find_movement(movement_id)
            .map_err(|e| LedgerError::dependency_unavailable(e.to_string()))?
            .ok_or_else(|| LedgerError::not_found(format!("movement {movement_id}")))
    }

    pub fn movements_for_account(
        &self,
        account_number: &AccountNumber,
        page: Page,
    ) -> LedgerResult<Vec<Movement>> {
        self.store
            .find_movements_by_account(account_number, page)
            .map_err(|e| LedgerError::dependency_unavailable(e.to_string()))
    }

    fn load_account(&self, account_number: &AccountNumber) -> LedgerResult<Account> {
        self.store
            .find_account(account_number)
            .map_err(|e| LedgerError::dependency_unavailable(e.to_string()))?
            .ok_or_else(|| LedgerError::not_found(format!("account {account_number}")))
    }

    fn resolve_active_customer(&self, customer: &CustomerId) -> LedgerResult<CustomerProfile> {
        match self.directory.resolve(customer) {
            Ok(Some(profile)) if profile.active => Ok(profile),
            Ok(_) => Err(LedgerError::UnknownOrInactiveCustomer(customer.clone())),
            Err(IdentityError::Unavailable(msg)) => Err(LedgerError::dependency_unavailable(
                format!("customer directory: {msg}"),
            )),
        }
    }
}

fn map_store_error(err: StoreError, account_number: &AccountNumber) -> LedgerError {
    match err {
        StoreError::Conflict(_) => LedgerError::ConcurrentModification(account_number.clone()),
        StoreError::NotFound(_) => LedgerError::not_found(format!("account {account_number}")),
        StoreError::Storage(msg) => LedgerError::dependency_unavailable(format!("ledger store: {msg}")),
    }
}
