//! Account/movement store boundary.
//!
//! This module defines the storage-facing contracts for the ledger without
//! making any backend assumptions, plus the in-memory backend used by tests
//! and development.

pub mod in_memory;
pub mod query;
pub mod r#trait;

pub use in_memory::InMemoryLedgerStore;
pub use query::Page;
pub use r#trait::{AccountStore, LedgerStore, MovementStore, StoreError};
