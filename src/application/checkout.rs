//! Till-side checkout: validates what staff entered, prices the cart, then
//! places the order and, for card payments, records the payment as a second,
//! independent call.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::cart::{order_quantity, Cart, Totals};
use crate::domain::customer::CustomerInfo;
use crate::domain::errors::DomainError;
use crate::domain::menu::MenuItem;
use crate::domain::order::{OrderType, PaymentMode, SubmitOrder};
use crate::domain::payment::{CardDetails, CARD_NUMBER_ERROR};

use super::menu_store::MenuStore;
use super::order_writer::OrderWriter;
use super::payment_recorder::PaymentRecorder;

#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    pub customer: CustomerInfo,
    pub order_type: Option<OrderType>,
    pub payment_mode: Option<PaymentMode>,
    pub created_by: String,
    pub cart: Cart,
    pub card: Option<CardDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    NotApplicable,
    Recorded { payment_id: i32 },
    /// The order stands; only the payment record is missing.
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct Receipt {
    pub order_id: i32,
    pub submission_id: Uuid,
    pub totals: Totals,
    pub payment: PaymentOutcome,
}

#[derive(Clone)]
pub struct Checkout {
    writer: OrderWriter,
    recorder: PaymentRecorder,
}

impl Checkout {
    pub fn new(writer: OrderWriter, recorder: PaymentRecorder) -> Self {
        Self { writer, recorder }
    }

    /// Add `item` to `cart` unless it is marked unavailable. Returns whether
    /// the cart changed.
    pub fn add_to_cart(cart: &mut Cart, item: &MenuItem) -> bool {
        if !item.is_available {
            return false;
        }
        cart.add_item(item);
        true
    }

    /// Build a cart from `(item_id, quantity)` pairs using stored menu
    /// records. Unknown or unavailable items are refused, as is an item id
    /// listed twice.
    pub fn cart_from_menu(menu: &MenuStore, lines: &[(i32, u32)]) -> Result<Cart, DomainError> {
        let mut cart = Cart::new();
        let mut seen = HashSet::new();
        for &(item_id, quantity) in lines {
            if !seen.insert(item_id) {
                return Err(DomainError::invalid(format!(
                    "Item {item_id} appears more than once in the cart."
                )));
            }
            order_quantity(item_id, quantity)?;
            let item = menu.get(item_id).map_err(|e| match e {
                DomainError::NotFound(_) => {
                    DomainError::invalid(format!("Unknown menu item {item_id}."))
                }
                other => other,
            })?;
            if !Self::add_to_cart(&mut cart, &item) {
                return Err(DomainError::invalid(format!(
                    "{} is not available.",
                    item.name
                )));
            }
            cart.set_quantity(item_id, quantity);
        }
        Ok(cart)
    }

    pub fn submit(&self, draft: &CheckoutDraft) -> Result<Receipt, DomainError> {
        let order_type = draft
            .order_type
            .ok_or_else(|| DomainError::invalid("Order type is required."))?;
        let payment_mode = draft
            .payment_mode
            .ok_or_else(|| DomainError::invalid("Payment mode is required."))?;
        if draft.customer.name.trim().is_empty() {
            return Err(DomainError::invalid("Customer name is required."));
        }
        if draft.cart.is_empty() {
            return Err(DomainError::invalid("Cart is empty."));
        }
        if payment_mode == PaymentMode::Card {
            match &draft.card {
                Some(card) => card.validate_number()?,
                None => return Err(DomainError::invalid(CARD_NUMBER_ERROR)),
            }
        }

        let totals = draft.cart.totals();
        let submitted = self.writer.submit(&SubmitOrder {
            customer: draft.customer.clone(),
            order_type,
            payment_mode,
            total: totals.total.clone(),
            created_by: draft.created_by.clone(),
            cart: draft.cart.to_order_lines()?,
            card: draft.card.clone(),
        })?;

        let payment = match (&draft.card, payment_mode) {
            (Some(card), PaymentMode::Card)
                if !card.card_number.is_empty() && !card.card_holder_name.is_empty() =>
            {
                match self
                    .recorder
                    .record(&draft.customer.name, &draft.customer.phone, card)
                {
                    Ok(payment_id) => PaymentOutcome::Recorded { payment_id },
                    Err(e) => {
                        log::error!(
                            "Order {} placed but payment was not recorded: {}",
                            submitted.order_id,
                            e
                        );
                        PaymentOutcome::Failed {
                            message: e.to_string(),
                        }
                    }
                }
            }
            _ => PaymentOutcome::NotApplicable,
        };

        Ok(Receipt {
            order_id: submitted.order_id,
            submission_id: submitted.submission_id,
            totals,
            payment,
        })
    }
}
