//! Storage ports. Each call is one unit of work against storage: it acquires
//! a connection, runs its statement(s) and releases the connection before
//! returning. Nothing here spans more than one call.

use uuid::Uuid;

use super::customer::{Customer, CustomerInfo};
use super::errors::DomainError;
use super::menu::{MenuItem, MenuItemInput};
use super::order::{NewOrder, OrderItemView, OrderListEntry, OrderView};
use super::payment::{NewPayment, PaymentRecord};
use super::submission::{NewSubmissionEntry, SubmissionEntry};

pub trait CustomerRepository: Send + Sync + 'static {
    /// First customer whose name and phone both match exactly.
    fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Option<Customer>, DomainError>;
    fn insert(&self, customer: &CustomerInfo) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;
    fn list(&self) -> Result<Vec<Customer>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn insert_order(&self, order: &NewOrder) -> Result<i32, DomainError>;
    fn insert_item(&self, order_id: i32, item_id: i32, quantity: i32) -> Result<(), DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<OrderListEntry>, DomainError>;
    fn items(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError>;
    /// All orders with their customer's name, newest first.
    fn list_with_customer(&self) -> Result<Vec<OrderListEntry>, DomainError>;
    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<OrderView>, DomainError>;
}

pub trait PaymentRepository: Send + Sync + 'static {
    fn insert(&self, payment: &NewPayment) -> Result<i32, DomainError>;
    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<PaymentRecord>, DomainError>;
}

pub trait MenuRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<MenuItem>, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError>;
    fn insert(&self, item: &MenuItemInput) -> Result<i32, DomainError>;
    /// Replace every field of the record. Returns `false` if `id` is unknown.
    fn update(&self, id: i32, item: &MenuItemInput) -> Result<bool, DomainError>;
    /// Returns `false` if `id` is unknown.
    fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

pub trait SubmissionLog: Send + Sync + 'static {
    fn record(&self, entry: &NewSubmissionEntry) -> Result<(), DomainError>;
    /// Every entry in insertion order.
    fn entries(&self) -> Result<Vec<SubmissionEntry>, DomainError>;
    fn entries_for(&self, submission_id: Uuid) -> Result<Vec<SubmissionEntry>, DomainError>;
}
