use diesel::prelude::*;

use crate::db::Storage;
use crate::domain::errors::DomainError;
use crate::domain::payment::{NewPayment, PaymentRecord};
use crate::domain::ports::PaymentRepository;
use crate::schema::payment;

use super::models::{NewPaymentRow, PaymentRow};

pub struct DieselPaymentRepository {
    storage: Storage,
}

impl DieselPaymentRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl PaymentRepository for DieselPaymentRepository {
    fn insert(&self, new_payment: &NewPayment) -> Result<i32, DomainError> {
        let mut conn = self.storage.connection()?;

        let id = diesel::insert_into(payment::table)
            .values(&NewPaymentRow::from(new_payment))
            .returning(payment::payment_id)
            .get_result::<i32>(&mut conn)?;

        Ok(id)
    }

    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<PaymentRecord>, DomainError> {
        let mut conn = self.storage.connection()?;

        let rows = payment::table
            .filter(payment::customer_id.eq(customer_id))
            .order(payment::payment_id.desc())
            .select(PaymentRow::as_select())
            .load::<PaymentRow>(&mut conn)?;

        Ok(rows.into_iter().map(PaymentRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::DieselPaymentRepository;
    use crate::domain::customer::CustomerInfo;
    use crate::domain::payment::{CardDetails, NewPayment};
    use crate::domain::ports::{CustomerRepository, PaymentRepository};
    use crate::infrastructure::customer_repo::DieselCustomerRepository;
    use crate::infrastructure::test_support::setup_db;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn stored_payment_holds_only_last_four_digits() {
        let (_container, storage) = setup_db().await;
        let customers = DieselCustomerRepository::new(storage.clone());
        let repo = DieselPaymentRepository::new(storage);
        let customer_id = customers
            .insert(&CustomerInfo {
                name: "Jane Doe".to_string(),
                phone: "555-1111".to_string(),
                address: None,
            })
            .expect("insert customer failed");
        let card = CardDetails {
            card_id: None,
            card_holder_name: "Jane Doe".to_string(),
            card_number: "4000123412341234".to_string(),
            card_expiry: "01/29".to_string(),
        };

        repo.insert(&NewPayment::masked(customer_id, &card).unwrap())
            .expect("insert failed");

        let records = repo.list_for_customer(customer_id).expect("list failed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].card_last4, "1234");
        assert_eq!(records[0].card_id, "");
    }
}
