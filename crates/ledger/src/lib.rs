//! Account/movement ledger domain.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod account;
pub mod event;
pub mod movement;
pub mod strategy;

pub use account::{Account, AccountType};
pub use event::AccountEvent;
pub use movement::{Movement, MovementKind, MAX_DESCRIPTION_LEN};
pub use strategy::post;
