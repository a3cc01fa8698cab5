use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::cart::check_money;
use super::customer::CustomerInfo;
use super::errors::DomainError;
use super::payment::CardDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    TakeOut,
    Delivery,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::TakeOut => "take-out",
            OrderType::Delivery => "delivery",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dine-in" => Ok(OrderType::DineIn),
            "take-out" => Ok(OrderType::TakeOut),
            "delivery" => Ok(OrderType::Delivery),
            other => Err(DomainError::Internal(format!("unknown order type '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Card,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMode::Cash),
            "card" => Ok(PaymentMode::Card),
            other => Err(DomainError::Internal(format!(
                "unknown payment mode '{other}'"
            ))),
        }
    }
}

/// One cart line as persisted. Client-side names and prices are not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLineInput {
    pub item_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub order_type: OrderType,
    pub payment_mode: PaymentMode,
    pub total_price: BigDecimal,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i32,
    pub customer_id: i32,
    pub order_type: OrderType,
    pub payment_mode: PaymentMode,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct OrderListEntry {
    pub order: OrderView,
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemView {
    pub item_id: i32,
    /// `None` once the menu item has been deleted.
    pub name: Option<String>,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: OrderView,
    pub customer_name: Option<String>,
    pub items: Vec<OrderItemView>,
}

/// A validated order submission.
///
/// `total` is the caller's tax-inclusive figure and is stored unchanged
/// unless total verification is switched on in the order writer.
#[derive(Debug, Clone)]
pub struct SubmitOrder {
    pub customer: CustomerInfo,
    pub order_type: OrderType,
    pub payment_mode: PaymentMode,
    pub total: BigDecimal,
    pub created_by: String,
    pub cart: Vec<OrderLineInput>,
    pub card: Option<CardDetails>,
}

impl SubmitOrder {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.customer.name.trim().is_empty() {
            return Err(DomainError::invalid("Customer name is required."));
        }
        if self.cart.is_empty() {
            return Err(DomainError::invalid("Cart is empty."));
        }
        let mut seen = HashSet::new();
        for line in &self.cart {
            if line.quantity < 1 {
                return Err(DomainError::invalid(format!(
                    "Quantity for item {} must be at least 1.",
                    line.item_id
                )));
            }
            if !seen.insert(line.item_id) {
                return Err(DomainError::invalid(format!(
                    "Item {} appears more than once in the cart.",
                    line.item_id
                )));
            }
        }
        if self.total < BigDecimal::from(0) {
            return Err(DomainError::invalid("Total must not be negative."));
        }
        check_money(&self.total, "Total")?;
        if self.payment_mode == PaymentMode::Card {
            if let Some(card) = &self.card {
                card.validate_number()?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedOrder {
    pub order_id: i32,
    pub submission_id: Uuid,
}

/// Parse a decimal total as sent over the wire, e.g. `"28.82"`.
pub fn parse_total(raw: &str) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|_| DomainError::invalid(format!("Invalid total '{raw}'.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: i32, quantity: i32) -> OrderLineInput {
        OrderLineInput { item_id, quantity }
    }

    fn submission() -> SubmitOrder {
        SubmitOrder {
            customer: CustomerInfo {
                name: "Jane Doe".to_string(),
                phone: "555-1111".to_string(),
                address: None,
            },
            order_type: OrderType::TakeOut,
            payment_mode: PaymentMode::Cash,
            total: parse_total("11.30").expect("valid total"),
            created_by: "alice".to_string(),
            cart: vec![line(1, 1)],
            card: None,
        }
    }

    fn card(number: &str) -> CardDetails {
        CardDetails {
            card_id: None,
            card_holder_name: "Jane Doe".to_string(),
            card_number: number.to_string(),
            card_expiry: "12/27".to_string(),
        }
    }

    #[test]
    fn order_type_uses_kebab_case_tags() {
        assert_eq!(
            serde_json::to_string(&OrderType::DineIn).unwrap(),
            "\"dine-in\""
        );
        assert_eq!(
            serde_json::from_str::<OrderType>("\"take-out\"").unwrap(),
            OrderType::TakeOut
        );
        assert!(serde_json::from_str::<OrderType>("\"drive-thru\"").is_err());
    }

    #[test]
    fn storage_text_round_trips() {
        for t in [OrderType::DineIn, OrderType::TakeOut, OrderType::Delivery] {
            assert_eq!(t.as_str().parse::<OrderType>().unwrap(), t);
        }
        for m in [PaymentMode::Cash, PaymentMode::Card] {
            assert_eq!(m.as_str().parse::<PaymentMode>().unwrap(), m);
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn blank_customer_name_is_rejected() {
        let mut s = submission();
        s.customer.name = "  ".to_string();
        assert!(matches!(s.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn empty_cart_is_rejected() {
        let mut s = submission();
        s.cart.clear();
        assert!(matches!(s.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut s = submission();
        s.cart = vec![line(1, 0)];
        assert!(matches!(s.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn total_with_sub_cent_digits_is_rejected() {
        let mut s = submission();
        s.total = parse_total("11.305").unwrap();
        assert_eq!(
            s.validate().unwrap_err().to_string(),
            "Total must have at most 2 decimal places."
        );

        s.total = parse_total("123456789.00").unwrap();
        assert!(matches!(s.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_item_ids_are_rejected() {
        let mut s = submission();
        s.cart = vec![line(1, 1), line(1, 2)];
        assert!(matches!(s.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn card_submission_with_short_number_is_rejected() {
        let mut s = submission();
        s.payment_mode = PaymentMode::Card;
        s.card = Some(card("4111"));
        let err = s.validate().unwrap_err();
        assert_eq!(err.to_string(), "Card number must be exactly 16 digits.");
    }

    #[test]
    fn card_details_are_ignored_for_cash() {
        let mut s = submission();
        s.card = Some(card("not-a-card"));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn parse_total_rejects_garbage() {
        assert!(parse_total("abc").is_err());
        assert_eq!(parse_total(" 28.82 ").unwrap().to_string(), "28.82");
    }
}
