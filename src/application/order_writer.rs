use std::sync::Arc;

use uuid::Uuid;

use crate::domain::cart::Totals;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, SubmitOrder, SubmittedOrder};
use crate::domain::ports::{MenuRepository, OrderRepository, SubmissionLog};
use crate::domain::submission::{
    incomplete_submissions, NewSubmissionEntry, PartialSubmission, SubmissionStep,
};

use super::customer_resolver::CustomerResolver;

/// Persists an order header and its line items.
///
/// The submitted total is stored as given unless `verify_totals` is on, in
/// which case it must equal the total recomputed from stored menu prices.
/// The header and each line item are separate commits; a failure part-way
/// leaves the committed prefix in place and the write log shows how far the
/// submission got. Once every row is in, the order is reported as placed even
/// if the final `completed` log entry cannot be written; such a submission
/// then shows up as incomplete with all of its items inserted.
#[derive(Clone)]
pub struct OrderWriter {
    resolver: CustomerResolver,
    orders: Arc<dyn OrderRepository>,
    menu: Arc<dyn MenuRepository>,
    log: Arc<dyn SubmissionLog>,
    verify_totals: bool,
}

impl OrderWriter {
    pub fn new(
        resolver: CustomerResolver,
        orders: Arc<dyn OrderRepository>,
        menu: Arc<dyn MenuRepository>,
        log: Arc<dyn SubmissionLog>,
        verify_totals: bool,
    ) -> Self {
        Self {
            resolver,
            orders,
            menu,
            log,
            verify_totals,
        }
    }

    pub fn submit(&self, request: &SubmitOrder) -> Result<SubmittedOrder, DomainError> {
        request.validate()?;
        if self.verify_totals {
            self.verify_total(request)?;
        }

        let submission_id = Uuid::new_v4();
        self.log.record(&NewSubmissionEntry {
            expected_items: Some(request.cart.len() as i32),
            ..NewSubmissionEntry::new(submission_id, SubmissionStep::Started)
        })?;

        let customer_id = self.resolver.resolve(&request.customer)?;
        self.log.record(&NewSubmissionEntry {
            customer_id: Some(customer_id),
            ..NewSubmissionEntry::new(submission_id, SubmissionStep::CustomerResolved)
        })?;

        let order_id = self.orders.insert_order(&NewOrder {
            customer_id,
            order_type: request.order_type,
            payment_mode: request.payment_mode,
            total_price: request.total.clone(),
            created_by: request.created_by.clone(),
        })?;
        self.log.record(&NewSubmissionEntry {
            customer_id: Some(customer_id),
            order_id: Some(order_id),
            ..NewSubmissionEntry::new(submission_id, SubmissionStep::OrderInserted)
        })?;

        for line in &request.cart {
            self.orders
                .insert_item(order_id, line.item_id, line.quantity)
                .inspect_err(|e| {
                    log::error!(
                        "Order {} stopped after a partial write (submission {}): {}",
                        order_id,
                        submission_id,
                        e
                    )
                })?;
            self.log.record(&NewSubmissionEntry {
                order_id: Some(order_id),
                item_id: Some(line.item_id),
                quantity: Some(line.quantity),
                ..NewSubmissionEntry::new(submission_id, SubmissionStep::ItemInserted)
            })?;
        }

        // Every row is committed at this point; a lost `completed` marker must
        // not turn the order into an error the caller would retry.
        if let Err(e) = self.log.record(&NewSubmissionEntry {
            order_id: Some(order_id),
            ..NewSubmissionEntry::new(submission_id, SubmissionStep::Completed)
        }) {
            log::warn!(
                "Order {} is complete but submission {} was not marked completed: {}",
                order_id,
                submission_id,
                e
            );
        }

        log::info!(
            "Order {} placed for customer {} ({} lines, total {}, by {})",
            order_id,
            customer_id,
            request.cart.len(),
            request.total,
            request.created_by
        );
        Ok(SubmittedOrder {
            order_id,
            submission_id,
        })
    }

    /// Submissions that never logged `completed`, oldest first.
    pub fn incomplete_submissions(&self) -> Result<Vec<PartialSubmission>, DomainError> {
        Ok(incomplete_submissions(&self.log.entries()?))
    }

    fn verify_total(&self, request: &SubmitOrder) -> Result<(), DomainError> {
        let mut priced = Vec::with_capacity(request.cart.len());
        for line in &request.cart {
            let item = self.menu.find_by_id(line.item_id)?.ok_or_else(|| {
                DomainError::invalid(format!("Unknown menu item {}.", line.item_id))
            })?;
            priced.push((item.price, line.quantity as u32));
        }
        let expected = Totals::from_lines(priced.iter().map(|(p, q)| (p, *q))).total;
        if expected != request.total {
            log::warn!(
                "Rejected order total {} (recomputed {})",
                request.total,
                expected
            );
            return Err(DomainError::invalid(format!(
                "Submitted total {} does not match computed total {}.",
                request.total, expected
            )));
        }
        Ok(())
    }
}
