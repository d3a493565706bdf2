//! External customer directory collaborator.
//!
//! The ledger only consumes the interface; network-backed implementations
//! live with deployment code, out of scope here.

pub mod directory;
pub mod in_memory;

pub use directory::{CustomerDirectory, CustomerProfile, IdentityError};
pub use in_memory::InMemoryCustomerDirectory;
