use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::payment::{CardDetails, NewPayment, PaymentRecord};
use crate::domain::ports::PaymentRepository;

use super::customer_resolver::CustomerResolver;

/// Stores a masked card record for an existing customer.
///
/// Independent of the order write: it re-resolves the customer itself and a
/// failure here leaves any already-placed order untouched.
#[derive(Clone)]
pub struct PaymentRecorder {
    resolver: CustomerResolver,
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentRecorder {
    pub fn new(resolver: CustomerResolver, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { resolver, payments }
    }

    pub fn record(&self, name: &str, phone: &str, card: &CardDetails) -> Result<i32, DomainError> {
        if let Err(e) = card.validate_number() {
            log::warn!("Rejected card payment for '{}': {}", name, e);
            return Err(e);
        }

        let Some(customer_id) = self.resolver.find(name, phone)? else {
            log::warn!("Payment for unknown customer '{}'", name);
            return Err(DomainError::not_found("Customer not found"));
        };

        let payment = NewPayment::masked(customer_id, card)?;
        let id = self.payments.insert(&payment)?;
        log::info!(
            "Recorded card payment {} for customer {} (ending {})",
            id,
            customer_id,
            payment.card_last4
        );
        Ok(id)
    }

    pub fn payments_for(&self, customer_id: i32) -> Result<Vec<PaymentRecord>, DomainError> {
        self.payments.list_for_customer(customer_id)
    }
}
