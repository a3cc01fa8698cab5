use diesel::prelude::*;

use crate::db::Storage;
use crate::domain::customer::{Customer, CustomerInfo};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;
use crate::schema::customers;

use super::models::{CustomerRow, NewCustomerRow};

pub struct DieselCustomerRepository {
    storage: Storage,
}

impl DieselCustomerRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.storage.connection()?;

        let row = customers::table
            .filter(customers::name.eq(name))
            .filter(customers::phone.eq(phone))
            .order(customers::customer_id.asc())
            .select(CustomerRow::as_select())
            .first::<CustomerRow>(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn insert(&self, customer: &CustomerInfo) -> Result<i32, DomainError> {
        let mut conn = self.storage.connection()?;

        let id = diesel::insert_into(customers::table)
            .values(&NewCustomerRow::from(customer))
            .returning(customers::customer_id)
            .get_result::<i32>(&mut conn)?;

        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.storage.connection()?;

        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first::<CustomerRow>(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.storage.connection()?;

        let rows = customers::table
            .order(customers::customer_id.asc())
            .select(CustomerRow::as_select())
            .load::<CustomerRow>(&mut conn)?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::DieselCustomerRepository;
    use crate::domain::customer::CustomerInfo;
    use crate::domain::ports::CustomerRepository;
    use crate::infrastructure::test_support::setup_db;

    fn info(name: &str, phone: &str) -> CustomerInfo {
        CustomerInfo {
            name: name.to_string(),
            phone: phone.to_string(),
            address: Some("12 King St".to_string()),
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn insert_then_find_by_name_and_phone() {
        let (_container, storage) = setup_db().await;
        let repo = DieselCustomerRepository::new(storage);

        let id = repo.insert(&info("Jane Doe", "555-1111")).expect("insert failed");
        let found = repo
            .find_by_name_and_phone("Jane Doe", "555-1111")
            .expect("query failed")
            .expect("customer should exist");

        assert_eq!(found.id, id);
        assert_eq!(found.address.as_deref(), Some("12 King St"));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn lookup_requires_both_fields_to_match() {
        let (_container, storage) = setup_db().await;
        let repo = DieselCustomerRepository::new(storage);
        repo.insert(&info("Jane Doe", "555-1111")).expect("insert failed");

        assert!(repo
            .find_by_name_and_phone("Jane Doe", "")
            .expect("query failed")
            .is_none());
        assert!(repo
            .find_by_name_and_phone("jane doe", "555-1111")
            .expect("query failed")
            .is_none());
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn find_by_id_returns_none_for_unknown_id() {
        let (_container, storage) = setup_db().await;
        let repo = DieselCustomerRepository::new(storage);

        assert!(repo.find_by_id(4242).expect("query failed").is_none());
    }
}
