use std::sync::Arc;

use crate::domain::customer::CustomerInfo;
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;

/// Find-or-create lookup keyed on exact name + phone.
///
/// Nothing is cached between calls. Two concurrent first-time submissions
/// for the same name + phone can both miss the lookup and both insert; the
/// storage layer has no uniqueness constraint to stop it.
#[derive(Clone)]
pub struct CustomerResolver {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerResolver {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    /// Return the id of the customer matching `info.name` and `info.phone`,
    /// inserting one if none exists. An existing customer's address is
    /// never touched.
    pub fn resolve(&self, info: &CustomerInfo) -> Result<i32, DomainError> {
        if let Some(existing) = self.find(&info.name, &info.phone)? {
            return Ok(existing);
        }
        let id = self.customers.insert(info)?;
        log::info!("Created customer {} for '{}'", id, info.name);
        Ok(id)
    }

    /// Lookup only; never creates.
    pub fn find(&self, name: &str, phone: &str) -> Result<Option<i32>, DomainError> {
        Ok(self
            .customers
            .find_by_name_and_phone(name, phone)?
            .map(|c| c.id))
    }
}
