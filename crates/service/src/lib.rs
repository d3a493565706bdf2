//! Ledger service orchestration and statement generation.
//!
//! This crate is the transaction boundary: every balance-changing operation
//! goes through [`LedgerService`], and every report through
//! [`StatementGenerator`]. Both compose the store, directory and transport
//! seams, so tests run against in-memory implementations and deployments
//! swap in real backends.

pub mod ledger;
pub mod statement;


pub use ledger::{AccountUpdate, LedgerService};
pub use statement::{AccountStatement, MovementLine, StatementGenerator, StatementReport};
