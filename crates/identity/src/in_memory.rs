//! In-memory customer directory for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use corebank_core::CustomerId;

use crate::directory::{CustomerDirectory, CustomerProfile, IdentityError};

/// In-memory directory with a switchable outage mode.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: RwLock<HashMap<CustomerId, CustomerProfile>>,
    unavailable: AtomicBool,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, customer_id: CustomerId, profile: CustomerProfile) {
        if let Ok(mut customers) = self.customers.write() {
            customers.insert(customer_id, profile);
        }
    }

    /// Register an active customer with placeholder directory details.
    pub fn insert_active(&self, customer_id: CustomerId) {
        self.insert(
            customer_id.clone(),
            CustomerProfile {
                active: true,
                display_name: format!("customer {customer_id}"),
                identification_number: customer_id.as_str().to_string(),
            },
        );
    }

    /// Simulate a directory outage: every lookup fails fast.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl CustomerDirectory for InMemoryCustomerDirectory {
    fn resolve(&self, customer_id: &CustomerId) -> Result<Option<CustomerProfile>, IdentityError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityError::Unavailable("directory is offline".to_string()));
        }

        let customers = self
            .customers
            .read()
            .map_err(|_| IdentityError::Unavailable("lock poisoned".to_string()))?;

        Ok(customers.get(customer_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerId {
        "CLI-0A1B2C3D".parse().unwrap()
    }

    #[test]
    fn resolves_registered_customers() {
        let directory = InMemoryCustomerDirectory::new();
        directory.insert_active(customer());

        let profile = directory.resolve(&customer()).unwrap().unwrap();
        assert!(profile.active);
    }

    #[test]
    fn unknown_customers_resolve_to_none() {
        let directory = InMemoryCustomerDirectory::new();
        assert_eq!(directory.resolve(&customer()).unwrap(), None);
    }

    #[test]
    fn outage_mode_fails_fast() {
        let directory = InMemoryCustomerDirectory::new();
        directory.insert_active(customer());
        directory.set_unavailable(true);

        assert!(matches!(
            directory.resolve(&customer()),
            Err(IdentityError::Unavailable(_))
        ));
    }
}
