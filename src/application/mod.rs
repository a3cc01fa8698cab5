pub mod checkout;
pub mod customer_resolver;
pub mod menu_store;
pub mod order_history;
pub mod order_writer;
pub mod payment_recorder;

#[cfg(test)]
pub(crate) mod test_support;
