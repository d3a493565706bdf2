use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use corebank_core::CustomerId;

/// What the directory knows about a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub active: bool,
    pub display_name: String,
    pub identification_number: String,
}

/// Directory lookup failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The directory could not be reached (timeout, outage). Fail-safe:
    /// callers treat the customer as not resolvable, never as valid.
    #[error("customer directory unavailable: {0}")]
    Unavailable(String),
}

/// Resolves customer ids against the external identity service.
///
/// Implementations MUST bound every lookup with a timeout and surface
/// persistent failure as [`IdentityError::Unavailable`] rather than hang;
/// an account creation blocked on the directory blocks the ledger.
/// `Ok(None)` means the customer id does not exist.
pub trait CustomerDirectory: Send + Sync {
    fn resolve(&self, customer_id: &CustomerId) -> Result<Option<CustomerProfile>, IdentityError>;
}

impl<D> CustomerDirectory for Arc<D>
where
    D: CustomerDirectory + ?Sized,
{
    fn resolve(&self, customer_id: &CustomerId) -> Result<Option<CustomerProfile>, IdentityError> {
        (**self).resolve(customer_id)
    }
}
