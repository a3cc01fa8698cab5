use std::collections::HashMap;
use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::domain::customer::{CustomerDetail, CustomerSummary};
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderDetail, OrderListEntry};
use crate::domain::ports::{CustomerRepository, OrderRepository};

/// Read side over orders and customers.
#[derive(Clone)]
pub struct OrderHistory {
    customers: Arc<dyn CustomerRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderHistory {
    pub fn new(customers: Arc<dyn CustomerRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { customers, orders }
    }

    /// Every order with its customer's name, newest first.
    pub fn list_orders(&self) -> Result<Vec<OrderListEntry>, DomainError> {
        self.orders.list_with_customer()
    }

    pub fn order_detail(&self, id: i32) -> Result<OrderDetail, DomainError> {
        let Some(entry) = self.orders.find_by_id(id)? else {
            return Err(DomainError::not_found(format!("Order {id} not found")));
        };
        let items = self.orders.items(id)?;
        Ok(OrderDetail {
            order: entry.order,
            customer_name: entry.customer_name,
            items,
        })
    }

    pub fn list_customers(&self) -> Result<Vec<CustomerSummary>, DomainError> {
        let customers = self.customers.list()?;
        let mut stats: HashMap<i32, (usize, BigDecimal)> = HashMap::new();
        for entry in self.orders.list_with_customer()? {
            let (count, spent) = stats
                .entry(entry.order.customer_id)
                .or_insert_with(|| (0, BigDecimal::from(0)));
            *count += 1;
            *spent += &entry.order.total_price;
        }

        Ok(customers
            .into_iter()
            .map(|customer| {
                let (order_count, total_spent) = stats
                    .remove(&customer.id)
                    .unwrap_or_else(|| (0, BigDecimal::from(0)));
                CustomerSummary {
                    customer,
                    order_count,
                    total_spent,
                }
            })
            .collect())
    }

    pub fn customer_detail(&self, id: i32) -> Result<CustomerDetail, DomainError> {
        let Some(customer) = self.customers.find_by_id(id)? else {
            log::warn!("Customer not found for id: {}", id);
            return Err(DomainError::not_found("Customer not found"));
        };
        let orders = self.orders.list_for_customer(id)?;
        Ok(CustomerDetail::new(customer, orders))
    }
}
