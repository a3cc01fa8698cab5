//! Process-local storage backend.
//!
//! Implements every storage port over a mutex-guarded set of tables. Each
//! port call takes the lock once, so it behaves like one pooled connection
//! per call: separate calls interleave freely and nothing spans two of them.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerInfo};
use crate::domain::errors::DomainError;
use crate::domain::menu::{MenuItem, MenuItemInput};
use crate::domain::order::{NewOrder, OrderItemView, OrderListEntry, OrderView};
use crate::domain::payment::{NewPayment, PaymentRecord};
use crate::domain::ports::{
    CustomerRepository, MenuRepository, OrderRepository, PaymentRepository, SubmissionLog,
};
use crate::domain::submission::{NewSubmissionEntry, SubmissionEntry};

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<Customer>,
    menu: Vec<MenuItem>,
    orders: Vec<OrderView>,
    order_items: Vec<(i32, i32, i32)>,
    payments: Vec<PaymentRecord>,
    submission_log: Vec<SubmissionEntry>,
    last_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn customer_name(&self, customer_id: i32) -> Option<String> {
        self.customers
            .iter()
            .find(|c| c.id == customer_id)
            .map(|c| c.name.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
    }
}

fn newest_first(orders: &mut [OrderView]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

impl CustomerRepository for InMemoryStore {
    fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Option<Customer>, DomainError> {
        let tables = self.lock()?;
        Ok(tables
            .customers
            .iter()
            .find(|c| c.matches(name, phone))
            .cloned())
    }

    fn insert(&self, customer: &CustomerInfo) -> Result<i32, DomainError> {
        let mut tables = self.lock()?;
        let id = tables.next_id();
        tables.customers.push(Customer {
            id,
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
        });
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let tables = self.lock()?;
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.lock()?.customers.clone())
    }
}

impl OrderRepository for InMemoryStore {
    fn insert_order(&self, order: &NewOrder) -> Result<i32, DomainError> {
        let mut tables = self.lock()?;
        if !tables.customers.iter().any(|c| c.id == order.customer_id) {
            return Err(DomainError::Internal(format!(
                "foreign key violation: customer {} does not exist",
                order.customer_id
            )));
        }
        let id = tables.next_id();
        tables.orders.push(OrderView {
            id,
            customer_id: order.customer_id,
            order_type: order.order_type,
            payment_mode: order.payment_mode,
            total_price: order.total_price.clone(),
            created_at: Utc::now(),
            created_by: order.created_by.clone(),
        });
        Ok(id)
    }

    fn insert_item(&self, order_id: i32, item_id: i32, quantity: i32) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        if !tables.orders.iter().any(|o| o.id == order_id) {
            return Err(DomainError::Internal(format!(
                "foreign key violation: order {order_id} does not exist"
            )));
        }
        if tables
            .order_items
            .iter()
            .any(|(o, i, _)| *o == order_id && *i == item_id)
        {
            return Err(DomainError::Internal(format!(
                "duplicate key: order item ({order_id}, {item_id})"
            )));
        }
        tables.order_items.push((order_id, item_id, quantity));
        Ok(())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderListEntry>, DomainError> {
        let tables = self.lock()?;
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| OrderListEntry {
                order: o.clone(),
                customer_name: tables.customer_name(o.customer_id),
            }))
    }

    fn items(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError> {
        let tables = self.lock()?;
        let mut items: Vec<OrderItemView> = tables
            .order_items
            .iter()
            .filter(|(o, _, _)| *o == order_id)
            .map(|(_, item_id, quantity)| OrderItemView {
                item_id: *item_id,
                name: tables
                    .menu
                    .iter()
                    .find(|m| m.id == *item_id)
                    .map(|m| m.name.clone()),
                quantity: *quantity,
            })
            .collect();
        items.sort_by_key(|i| i.item_id);
        Ok(items)
    }

    fn list_with_customer(&self) -> Result<Vec<OrderListEntry>, DomainError> {
        let tables = self.lock()?;
        let mut orders = tables.orders.clone();
        newest_first(&mut orders);
        Ok(orders
            .into_iter()
            .map(|order| OrderListEntry {
                customer_name: tables.customer_name(order.customer_id),
                order,
            })
            .collect())
    }

    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<OrderView>, DomainError> {
        let tables = self.lock()?;
        let mut orders: Vec<OrderView> = tables
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        newest_first(&mut orders);
        Ok(orders)
    }
}

impl PaymentRepository for InMemoryStore {
    fn insert(&self, payment: &NewPayment) -> Result<i32, DomainError> {
        let mut tables = self.lock()?;
        if !tables.customers.iter().any(|c| c.id == payment.customer_id) {
            return Err(DomainError::Internal(format!(
                "foreign key violation: customer {} does not exist",
                payment.customer_id
            )));
        }
        let id = tables.next_id();
        tables.payments.push(PaymentRecord {
            id,
            customer_id: payment.customer_id,
            card_id: payment.card_id.clone(),
            card_holder_name: payment.card_holder_name.clone(),
            card_last4: payment.card_last4.clone(),
            card_expiry: payment.card_expiry.clone(),
            recorded_at: Utc::now(),
        });
        Ok(id)
    }

    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<PaymentRecord>, DomainError> {
        let tables = self.lock()?;
        Ok(tables
            .payments
            .iter()
            .rev()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

impl MenuRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        Ok(self.lock()?.menu.clone())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        let tables = self.lock()?;
        Ok(tables.menu.iter().find(|m| m.id == id).cloned())
    }

    fn insert(&self, item: &MenuItemInput) -> Result<i32, DomainError> {
        let mut tables = self.lock()?;
        let id = tables.next_id();
        tables.menu.push(MenuItem {
            id,
            name: item.name.clone(),
            category: item.category,
            price: item.price.clone(),
            is_available: item.is_available,
            image_url: item.image_url.clone(),
        });
        Ok(id)
    }

    fn update(&self, id: i32, item: &MenuItemInput) -> Result<bool, DomainError> {
        let mut tables = self.lock()?;
        let Some(existing) = tables.menu.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };
        existing.name = item.name.clone();
        existing.category = item.category;
        existing.price = item.price.clone();
        existing.is_available = item.is_available;
        existing.image_url = item.image_url.clone();
        Ok(true)
    }

    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut tables = self.lock()?;
        let before = tables.menu.len();
        tables.menu.retain(|m| m.id != id);
        Ok(tables.menu.len() < before)
    }
}

impl SubmissionLog for InMemoryStore {
    fn record(&self, entry: &NewSubmissionEntry) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        let id = tables.next_id();
        tables.submission_log.push(SubmissionEntry {
            id,
            entry: entry.clone(),
            recorded_at: Utc::now(),
        });
        Ok(())
    }

    fn entries(&self) -> Result<Vec<SubmissionEntry>, DomainError> {
        Ok(self.lock()?.submission_log.clone())
    }

    fn entries_for(&self, submission_id: Uuid) -> Result<Vec<SubmissionEntry>, DomainError> {
        let tables = self.lock()?;
        Ok(tables
            .submission_log
            .iter()
            .filter(|e| e.entry.submission_id == submission_id)
            .cloned()
            .collect())
    }
}
