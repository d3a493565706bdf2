use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use corebank_core::{AccountNumber, CustomerId};
use corebank_events::Event;

use crate::account::AccountType;

/// Account lifecycle facts, published best-effort after a successful write.
///
/// Movement posting publishes nothing; only account lifecycle changes are
/// externally announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountEvent {
    #[serde(rename_all = "camelCase")]
    Opened {
        account_number: AccountNumber,
        owner_customer_id: CustomerId,
        account_type: AccountType,
        opening_balance: Decimal,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Updated {
        account_number: AccountNumber,
        account_type: AccountType,
        active: bool,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::Opened { .. } => "ledger.account.opened",
            AccountEvent::Updated { .. } => "ledger.account.updated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccountEvent::Opened { occurred_at, .. }
            | AccountEvent::Updated { occurred_at, .. } => *occurred_at,
        }
    }
}
