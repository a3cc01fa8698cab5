use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::order::OrderView;

/// Name/phone/address as typed at the counter. Two customers are the same
/// when both name and phone match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
}

impl Customer {
    pub fn matches(&self, name: &str, phone: &str) -> bool {
        self.name == name && self.phone == phone
    }
}

#[derive(Debug, Clone)]
pub struct CustomerSummary {
    pub customer: Customer,
    pub order_count: usize,
    pub total_spent: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: Customer,
    /// Newest first.
    pub orders: Vec<OrderView>,
    pub total_spent: BigDecimal,
    pub last_order: Option<DateTime<Utc>>,
}

impl CustomerDetail {
    pub fn new(customer: Customer, mut orders: Vec<OrderView>) -> Self {
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total_spent = sum_totals(&orders);
        let last_order = orders.first().map(|o| o.created_at);
        Self {
            customer,
            orders,
            total_spent,
            last_order,
        }
    }
}

pub fn sum_totals(orders: &[OrderView]) -> BigDecimal {
    orders
        .iter()
        .fold(BigDecimal::from(0), |acc, o| acc + &o.total_price)
}
