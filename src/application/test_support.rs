use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerInfo};
use crate::domain::errors::DomainError;
use crate::domain::menu::{Category, MenuItem, MenuItemInput};
use crate::domain::order::{NewOrder, OrderItemView, OrderListEntry, OrderView};
use crate::domain::payment::{CardDetails, NewPayment, PaymentRecord};
use crate::domain::ports::{
    CustomerRepository, MenuRepository, OrderRepository, PaymentRepository, SubmissionLog,
};
use crate::domain::submission::{NewSubmissionEntry, SubmissionEntry, SubmissionStep};
use crate::infrastructure::memory::InMemoryStore;

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid decimal")
}

pub fn info(name: &str, phone: &str) -> CustomerInfo {
    CustomerInfo {
        name: name.to_string(),
        phone: phone.to_string(),
        address: None,
    }
}

pub fn card(number: &str) -> CardDetails {
    CardDetails {
        card_id: Some("card-7".to_string()),
        card_holder_name: "Jane Doe".to_string(),
        card_number: number.to_string(),
        card_expiry: "11/27".to_string(),
    }
}

pub fn menu_input(name: &str, category: Category, price: &str) -> MenuItemInput {
    MenuItemInput {
        name: name.to_string(),
        category,
        price: dec(price),
        is_available: true,
        image_url: None,
    }
}

pub fn storage_failure() -> DomainError {
    DomainError::Internal("connection reset".to_string())
}

/// In-memory store that fails selected writes, to exercise partial-commit
/// paths.
#[derive(Default)]
pub struct FailingStore {
    pub inner: Arc<InMemoryStore>,
    fail_customer_insert: bool,
    fail_item_insert_from: Option<usize>,
    fail_payment_insert: bool,
    fail_completed_log: bool,
    items_inserted: std::sync::atomic::AtomicUsize,
}

impl FailingStore {
    pub fn failing_customer_insert() -> Self {
        Self {
            fail_customer_insert: true,
            ..Self::default()
        }
    }

    /// Fail the item insert with index `n` (0-based) and every one after it.
    pub fn failing_item_insert_from(n: usize) -> Self {
        Self {
            fail_item_insert_from: Some(n),
            ..Self::default()
        }
    }

    pub fn failing_payment_insert() -> Self {
        Self {
            fail_payment_insert: true,
            ..Self::default()
        }
    }

    /// Fail only the final `completed` write-log entry.
    pub fn failing_completed_log() -> Self {
        Self {
            fail_completed_log: true,
            ..Self::default()
        }
    }
}

impl CustomerRepository for FailingStore {
    fn find_by_name_and_phone(&self, name: &str, phone: &str) -> Result<Option<Customer>, DomainError> {
        self.inner.find_by_name_and_phone(name, phone)
    }

    fn insert(&self, customer: &CustomerInfo) -> Result<i32, DomainError> {
        if self.fail_customer_insert {
            return Err(storage_failure());
        }
        CustomerRepository::insert(&*self.inner, customer)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        CustomerRepository::find_by_id(&*self.inner, id)
    }

    fn list(&self) -> Result<Vec<Customer>, DomainError> {
        CustomerRepository::list(&*self.inner)
    }
}

impl OrderRepository for FailingStore {
    fn insert_order(&self, order: &NewOrder) -> Result<i32, DomainError> {
        self.inner.insert_order(order)
    }

    fn insert_item(&self, order_id: i32, item_id: i32, quantity: i32) -> Result<(), DomainError> {
        let n = self
            .items_inserted
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail_item_insert_from.is_some_and(|from| n >= from) {
            return Err(storage_failure());
        }
        self.inner.insert_item(order_id, item_id, quantity)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderListEntry>, DomainError> {
        OrderRepository::find_by_id(&*self.inner, id)
    }

    fn items(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError> {
        self.inner.items(order_id)
    }

    fn list_with_customer(&self) -> Result<Vec<OrderListEntry>, DomainError> {
        self.inner.list_with_customer()
    }

    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<OrderView>, DomainError> {
        OrderRepository::list_for_customer(&*self.inner, customer_id)
    }
}

impl PaymentRepository for FailingStore {
    fn insert(&self, payment: &NewPayment) -> Result<i32, DomainError> {
        if self.fail_payment_insert {
            return Err(storage_failure());
        }
        PaymentRepository::insert(&*self.inner, payment)
    }

    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<PaymentRecord>, DomainError> {
        PaymentRepository::list_for_customer(&*self.inner, customer_id)
    }
}

impl MenuRepository for FailingStore {
    fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        MenuRepository::list(&*self.inner)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        MenuRepository::find_by_id(&*self.inner, id)
    }

    fn insert(&self, item: &MenuItemInput) -> Result<i32, DomainError> {
        MenuRepository::insert(&*self.inner, item)
    }

    fn update(&self, id: i32, item: &MenuItemInput) -> Result<bool, DomainError> {
        self.inner.update(id, item)
    }

    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        self.inner.delete(id)
    }
}

impl SubmissionLog for FailingStore {
    fn record(&self, entry: &NewSubmissionEntry) -> Result<(), DomainError> {
        if self.fail_completed_log && entry.step == SubmissionStep::Completed {
            return Err(storage_failure());
        }
        self.inner.record(entry)
    }

    fn entries(&self) -> Result<Vec<SubmissionEntry>, DomainError> {
        self.inner.entries()
    }

    fn entries_for(&self, submission_id: Uuid) -> Result<Vec<SubmissionEntry>, DomainError> {
        self.inner.entries_for(submission_id)
    }
}
