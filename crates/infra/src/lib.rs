//! Infrastructure layer: store contracts and backends.

pub mod ledger_store;

pub use ledger_store::{
    AccountStore, InMemoryLedgerStore, LedgerStore, MovementStore, Page, StoreError,
};
