use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use corebank_core::{AccountNumber, CustomerId};

/// Account type (determines nothing about posting rules today; kept for
/// product classification and reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Savings,
    Checking,
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountType::Savings => f.write_str("SAVINGS"),
            AccountType::Checking => f.write_str("CHECKING"),
        }
    }
}

/// A customer account and its live balance.
///
/// `current_balance` is owned exclusively by this aggregate: it changes only
/// through a movement strategy ([`crate::strategy::post`]), and `revision` is
/// managed by the storage layer's compare-and-swap. Neither is ever
/// caller-assignable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    account_number: AccountNumber,
    account_type: AccountType,
    opening_balance: Decimal,
    current_balance: Decimal,
    active: bool,
    owner_customer_id: CustomerId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: u64,
}

impl Account {
    /// Open a new account. The account number is generated here; the current
    /// balance starts at the opening balance.
    ///
    /// Input validation (non-negative opening balance, owner resolution) is
    /// the ledger service's responsibility.
    pub fn open(
        owner_customer_id: CustomerId,
        account_type: AccountType,
        opening_balance: Decimal,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account_number: AccountNumber::generate(),
            account_type,
            opening_balance,
            current_balance: opening_balance,
            active: true,
            owner_customer_id,
            created_at: opened_at,
            updated_at: opened_at,
            revision: 1,
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    /// Soft-delete flag: an inactive account accepts no further movements.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn owner_customer_id(&self) -> &CustomerId {
        &self.owner_customer_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Monotonically increasing revision used for optimistic concurrency.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Reclassify the account. One of the two caller-mutable fields.
    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
    }

    /// Activate/deactivate the account. One of the two caller-mutable fields.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Balance transition; reserved for movement strategies.
    pub(crate) fn set_current_balance(&mut self, balance: Decimal) {
        self.current_balance = balance;
    }

    /// Stamp the state produced by a successful compare-and-swap.
    ///
    /// Reserved for storage implementations; everything else treats the
    /// revision as read-only.
    pub fn committed(mut self, revision: u64, updated_at: DateTime<Utc>) -> Self {
        self.revision = revision;
        self.updated_at = updated_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> CustomerId {
        "CLI-0A1B2C3D".parse().unwrap()
    }

    #[test]
    fn open_starts_at_the_opening_balance() {
        let opening: Decimal = "1000.00".parse().unwrap();
        let account = Account::open(owner(), AccountType::Savings, opening, Utc::now());

        assert_eq!(account.current_balance(), opening);
        assert_eq!(account.opening_balance(), opening);
        assert!(account.is_active());
        assert_eq!(account.revision(), 1);
        assert!(account.account_number().as_str().starts_with("CTA-"));
    }

    #[test]
    fn committed_stamps_revision_and_timestamp() {
        let account = Account::open(owner(), AccountType::Checking, Decimal::ZERO, Utc::now());
        let later = Utc::now();
        let committed = account.clone().committed(account.revision() + 1, later);

        assert_eq!(committed.revision(), account.revision() + 1);
        assert_eq!(committed.updated_at(), later);
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let account = Account::open(owner(), AccountType::Savings, Decimal::ZERO, Utc::now());
        let json = serde_json::to_value(&account).unwrap();

        assert!(json.get("accountNumber").is_some());
        assert!(json.get("openingBalance").is_some());
        assert_eq!(json["accountType"], "SAVINGS");
        assert_eq!(json["active"], true);
    }
}
