//! Ledger error model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::id::{AccountNumber, CustomerId};

/// Result type used across the ledger layers.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error taxonomy.
///
/// Validation and precondition failures are deterministic and must not be
/// retried; `ConcurrentModification` is the one retryable variant (callers
/// retry from a fresh read). `DependencyUnavailable` covers unreachable
/// collaborators (customer directory, storage backend) and is never silently
/// downgraded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A value failed validation (e.g. malformed or out-of-range input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The account is soft-deleted; no further movements may post.
    #[error("account {0} is inactive")]
    InactiveAccount(AccountNumber),

    /// A withdrawal exceeded the available balance.
    #[error("insufficient funds: available balance {available}, requested withdrawal {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    /// A movement kind with no posting rule.
    #[error("unsupported movement kind: {0}")]
    UnsupportedMovementKind(String),

    /// The customer directory did not resolve the customer to an active record.
    #[error("customer {0} is unknown or inactive")]
    UnknownOrInactiveCustomer(CustomerId),

    /// A concurrent writer advanced the account revision first. Retryable:
    /// re-read the account and re-apply against fresh state.
    #[error("concurrent modification of account {0}; retry with fresh state")]
    ConcurrentModification(AccountNumber),

    /// A statement range where the start date falls after the end date.
    #[error("illegal date range: {from} is after {to}")]
    IllegalDateRange { from: NaiveDate, to: NaiveDate },

    /// An external collaborator was unreachable or timed out.
    #[error("dependency unavailable: {0}")]
    DependencyUnavailable(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn dependency_unavailable(msg: impl Into<String>) -> Self {
        Self::DependencyUnavailable(msg.into())
    }

    /// Whether the caller may retry the failed operation against fresh state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification(_))
    }
}
