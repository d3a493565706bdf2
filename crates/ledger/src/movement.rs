use chrono::{DateTime, Utc};
use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use corebank_core::{AccountNumber, LedgerError, MovementId};

/// Maximum length of a movement's free-text description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Movement kind. The set is closed: posting rules dispatch exhaustively over
/// this enum, and unknown kinds can only appear at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MovementKind::Deposit => f.write_str("DEPOSIT"),
            MovementKind::Withdrawal => f.write_str("WITHDRAWAL"),
        }
    }
}

impl FromStr for MovementKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(MovementKind::Deposit),
            "WITHDRAWAL" => Ok(MovementKind::Withdrawal),
            other => Err(LedgerError::UnsupportedMovementKind(other.to_string())),
        }
    }
}

/// One posted deposit or withdrawal, with before/after balance snapshots.
///
/// Immutable once persisted: there is no update, delete or re-ordering
/// operation anywhere in the API. Movements for one account, ordered by
/// `occurred_at`, form the complete derivation chain of its balance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    movement_id: MovementId,
    account_number: AccountNumber,
    kind: MovementKind,
    /// Signed: positive for deposits, negative for withdrawals.
    value: Decimal,
    balance_before: Decimal,
    balance_after: Decimal,
    occurred_at: DateTime<Utc>,
    description: Option<String>,
}

impl Movement {
    /// Record a movement. Only strategies construct movements; everything
    /// else reads them.
    pub(crate) fn record(
        account_number: AccountNumber,
        kind: MovementKind,
        value: Decimal,
        balance_before: Decimal,
        balance_after: Decimal,
        occurred_at: DateTime<Utc>,
        description: Option<String>,
    ) -> Self {
        Self {
            movement_id: MovementId::generate(),
            account_number,
            kind,
            value,
            balance_before,
            balance_after,
            occurred_at,
            description,
        }
    }

    pub fn movement_id(&self) -> &MovementId {
        &self.movement_id
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn balance_before(&self) -> Decimal {
        self.balance_before
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
