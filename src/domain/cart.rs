//! In-memory cart used by the checkout flow.
//!
//! Money is kept as [`BigDecimal`]. Totals follow a single rounding rule:
//! the subtotal is exact, the tax is rounded half-up to cents, and the total
//! is the sum of the two rounded half-up to cents.

use bigdecimal::{BigDecimal, RoundingMode};

use super::errors::DomainError;
use super::menu::MenuItem;
use super::order::OrderLineInput;

/// Harmonized sales tax applied to every order (13%).
pub fn tax_rate() -> BigDecimal {
    BigDecimal::new(13.into(), 2)
}

pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// Money columns are NUMERIC(10,2): at most two decimal places and an
/// absolute value below 10^8.
pub fn check_money(value: &BigDecimal, label: &str) -> Result<(), DomainError> {
    if round_money(value) != *value {
        return Err(DomainError::invalid(format!(
            "{label} must have at most 2 decimal places."
        )));
    }
    if value.abs() >= BigDecimal::from(100_000_000) {
        return Err(DomainError::invalid(format!(
            "{label} must be less than 100000000."
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
}

impl Totals {
    /// Compute totals for `(price, quantity)` pairs.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (&'a BigDecimal, u32)>,
    {
        let subtotal = lines
            .into_iter()
            .fold(BigDecimal::from(0), |acc, (price, qty)| {
                acc + price * BigDecimal::from(qty)
            });
        let tax = round_money(&(&subtotal * tax_rate()));
        let total = round_money(&(&subtotal + &tax));
        Totals {
            subtotal: round_money(&subtotal),
            tax,
            total,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` with quantity 1, or bump the quantity of its existing
    /// line. Availability is the caller's concern.
    pub fn add_item(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item_id: item.id,
                name: item.name.clone(),
                price: item.price.clone(),
                quantity: 1,
            }),
        }
    }

    /// Set the quantity of a line; zero removes it. Unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: i32, quantity: u32) {
        if quantity == 0 {
            self.lines.retain(|l| l.item_id != item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn totals(&self) -> Totals {
        Totals::from_lines(self.lines.iter().map(|l| (&l.price, l.quantity)))
    }

    pub fn to_order_lines(&self) -> Result<Vec<OrderLineInput>, DomainError> {
        self.lines
            .iter()
            .map(|l| {
                Ok(OrderLineInput {
                    item_id: l.item_id,
                    quantity: order_quantity(l.item_id, l.quantity)?,
                })
            })
            .collect()
    }
}

/// Quantities are stored as INTEGER.
pub fn order_quantity(item_id: i32, quantity: u32) -> Result<i32, DomainError> {
    i32::try_from(quantity).map_err(|_| {
        DomainError::invalid(format!("Quantity for item {item_id} is too large."))
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::menu::Category;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn item(id: i32, price: &str) -> MenuItem {
        MenuItem {
            id,
            name: format!("item-{id}"),
            category: Category::Main,
            price: dec(price),
            is_available: true,
            image_url: None,
        }
    }

    #[test]
    fn add_item_appends_then_increments() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "10.00"));
        cart.add_item(&item(2, "5.50"));
        cart.add_item(&item(1, "10.00"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[1].quantity, 1);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "10.00"));
        cart.add_item(&item(2, "5.50"));

        cart.set_quantity(1, 0);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].item_id, 2);
    }

    #[test]
    fn set_quantity_overwrites_and_ignores_unknown_ids() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "10.00"));

        cart.set_quantity(1, 4);
        cart.set_quantity(99, 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn reference_cart_totals() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "10.00"));
        cart.set_quantity(1, 2);
        cart.add_item(&item(2, "5.50"));

        let totals = cart.totals();

        assert_eq!(totals.subtotal, dec("25.50"));
        assert_eq!(totals.tax, dec("3.32"));
        assert_eq!(totals.total, dec("28.82"));
        assert_eq!(totals.total.to_string(), "28.82");
    }

    #[test]
    fn component_rounding_matches_rounding_the_gross_amount() {
        // Rounding tax then summing must agree with rounding subtotal * 1.13
        // whenever prices are whole cents.
        let carts: Vec<Vec<(&str, u32)>> = vec![
            vec![("10.00", 2), ("5.50", 1)],
            vec![("0.01", 1)],
            vec![("0.05", 1)],
            vec![("3.85", 3), ("12.99", 1)],
            vec![("7.77", 7)],
            vec![("19.95", 2), ("2.50", 4), ("0.35", 1)],
            vec![("999.99", 9)],
        ];

        for cart in carts {
            let prices: Vec<(BigDecimal, u32)> =
                cart.iter().map(|(p, q)| (dec(p), *q)).collect();
            let totals = Totals::from_lines(prices.iter().map(|(p, q)| (p, *q)));

            let subtotal: BigDecimal = prices
                .iter()
                .fold(BigDecimal::from(0), |acc, (p, q)| acc + p * BigDecimal::from(*q));
            let gross = round_money(&(&subtotal * dec("1.13")));

            assert_eq!(totals.subtotal, subtotal);
            assert_eq!(totals.tax, round_money(&(&subtotal * tax_rate())));
            assert_eq!(totals.total, round_money(&(&totals.subtotal + &totals.tax)));
            assert_eq!(totals.total, gross, "cart {:?}", cart);
        }
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = Cart::new().totals();
        assert_eq!(totals.subtotal, BigDecimal::from(0));
        assert_eq!(totals.total, BigDecimal::from(0));
    }

    #[test]
    fn to_order_lines_keeps_ids_and_quantities() {
        let mut cart = Cart::new();
        cart.add_item(&item(3, "4.25"));
        cart.set_quantity(3, 5);

        let lines = cart.to_order_lines().unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item_id, 3);
        assert_eq!(lines[0].quantity, 5);
    }

    #[test]
    fn money_is_limited_to_two_places_and_eight_integer_digits() {
        assert!(check_money(&dec("11.30"), "Total").is_ok());
        assert!(check_money(&dec("11.300"), "Total").is_ok());
        assert!(check_money(&dec("99999999.99"), "Total").is_ok());

        assert_eq!(
            check_money(&dec("11.305"), "Total").unwrap_err().to_string(),
            "Total must have at most 2 decimal places."
        );
        assert_eq!(
            check_money(&dec("100000000"), "Price").unwrap_err().to_string(),
            "Price must be less than 100000000."
        );
        assert!(check_money(&dec("-100000000.00"), "Total").is_err());
    }

    #[test]
    fn oversized_quantity_is_a_validation_error() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "1.00"));
        cart.set_quantity(1, u32::MAX);

        let err = cart.to_order_lines().unwrap_err();

        assert_eq!(err.to_string(), "Quantity for item 1 is too large.");
        assert_eq!(order_quantity(1, i32::MAX as u32).unwrap(), i32::MAX);
    }
}
