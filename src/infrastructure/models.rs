use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerInfo};
use crate::domain::errors::DomainError;
use crate::domain::menu::{MenuItem, MenuItemInput};
use crate::domain::order::{NewOrder, OrderView};
use crate::domain::payment::{NewPayment, PaymentRecord};
use crate::domain::submission::{NewSubmissionEntry, SubmissionEntry};
use crate::schema::{customers, menu_items, order_items, orders, payment, submission_log};

// ── customers ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(primary_key(customer_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub customer_id: i32,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub address: Option<&'a str>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.customer_id,
            name: row.name,
            phone: row.phone,
            address: row.address,
        }
    }
}

impl<'a> From<&'a CustomerInfo> for NewCustomerRow<'a> {
    fn from(info: &'a CustomerInfo) -> Self {
        NewCustomerRow {
            name: &info.name,
            phone: &info.phone,
            address: info.address.as_deref(),
        }
    }
}

// ── menu_items ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = menu_items)]
#[diesel(primary_key(item_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MenuItemRow {
    pub item_id: i32,
    pub name: String,
    pub category: String,
    pub price: BigDecimal,
    pub is_available: bool,
    pub image_url: Option<String>,
}

/// Used for inserts and for full-record updates; `None` clears the column.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = menu_items)]
#[diesel(treat_none_as_null = true)]
pub struct MenuItemValues {
    pub name: String,
    pub category: String,
    pub price: BigDecimal,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DomainError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        Ok(MenuItem {
            id: row.item_id,
            name: row.name,
            category: row.category.parse()?,
            price: row.price,
            is_available: row.is_available,
            image_url: row.image_url,
        })
    }
}

impl From<&MenuItemInput> for MenuItemValues {
    fn from(item: &MenuItemInput) -> Self {
        MenuItemValues {
            name: item.name.clone(),
            category: item.category.as_str().to_string(),
            price: item.price.clone(),
            is_available: item.is_available,
            image_url: item.image_url.clone(),
        }
    }
}

// ── orders / order_items ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub order_id: i32,
    pub customer_id: i32,
    pub order_type: String,
    pub payment_mode: String,
    pub total_price: BigDecimal,
    pub order_date_time: DateTime<Utc>,
    pub created_by_user: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub customer_id: i32,
    pub order_type: &'a str,
    pub payment_mode: &'a str,
    pub total_price: &'a BigDecimal,
    pub created_by_user: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
}

impl TryFrom<OrderRow> for OrderView {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(OrderView {
            id: row.order_id,
            customer_id: row.customer_id,
            order_type: row.order_type.parse()?,
            payment_mode: row.payment_mode.parse()?,
            total_price: row.total_price,
            created_at: row.order_date_time,
            created_by: row.created_by_user,
        })
    }
}

impl<'a> From<&'a NewOrder> for NewOrderRow<'a> {
    fn from(order: &'a NewOrder) -> Self {
        NewOrderRow {
            customer_id: order.customer_id,
            order_type: order.order_type.as_str(),
            payment_mode: order.payment_mode.as_str(),
            total_price: &order.total_price,
            created_by_user: &order.created_by,
        }
    }
}

// ── payment ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payment)]
#[diesel(primary_key(payment_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    pub payment_id: i32,
    pub customer_id: i32,
    pub card_id: String,
    pub card_holder_name: String,
    pub card_last4: String,
    pub card_expiry: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payment)]
pub struct NewPaymentRow<'a> {
    pub customer_id: i32,
    pub card_id: &'a str,
    pub card_holder_name: &'a str,
    pub card_last4: &'a str,
    pub card_expiry: &'a str,
}

impl From<PaymentRow> for PaymentRecord {
    fn from(row: PaymentRow) -> Self {
        PaymentRecord {
            id: row.payment_id,
            customer_id: row.customer_id,
            card_id: row.card_id,
            card_holder_name: row.card_holder_name,
            card_last4: row.card_last4,
            card_expiry: row.card_expiry,
            recorded_at: row.recorded_at,
        }
    }
}

impl<'a> From<&'a NewPayment> for NewPaymentRow<'a> {
    fn from(p: &'a NewPayment) -> Self {
        NewPaymentRow {
            customer_id: p.customer_id,
            card_id: &p.card_id,
            card_holder_name: &p.card_holder_name,
            card_last4: &p.card_last4,
            card_expiry: &p.card_expiry,
        }
    }
}

// ── submission_log ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = submission_log)]
#[diesel(primary_key(entry_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubmissionLogRow {
    pub entry_id: i32,
    pub submission_id: Uuid,
    pub step: String,
    pub customer_id: Option<i32>,
    pub order_id: Option<i32>,
    pub item_id: Option<i32>,
    pub quantity: Option<i32>,
    pub expected_items: Option<i32>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = submission_log)]
pub struct NewSubmissionLogRow {
    pub submission_id: Uuid,
    pub step: &'static str,
    pub customer_id: Option<i32>,
    pub order_id: Option<i32>,
    pub item_id: Option<i32>,
    pub quantity: Option<i32>,
    pub expected_items: Option<i32>,
}

impl TryFrom<SubmissionLogRow> for SubmissionEntry {
    type Error = DomainError;

    fn try_from(row: SubmissionLogRow) -> Result<Self, Self::Error> {
        Ok(SubmissionEntry {
            id: row.entry_id,
            entry: NewSubmissionEntry {
                submission_id: row.submission_id,
                step: row.step.parse()?,
                customer_id: row.customer_id,
                order_id: row.order_id,
                item_id: row.item_id,
                quantity: row.quantity,
                expected_items: row.expected_items,
            },
            recorded_at: row.recorded_at,
        })
    }
}

impl From<&NewSubmissionEntry> for NewSubmissionLogRow {
    fn from(e: &NewSubmissionEntry) -> Self {
        NewSubmissionLogRow {
            submission_id: e.submission_id,
            step: e.step.as_str(),
            customer_id: e.customer_id,
            order_id: e.order_id,
            item_id: e.item_id,
            quantity: e.quantity,
            expected_items: e.expected_items,
        }
    }
}
