use std::sync::Arc;

use crate::application::checkout::Checkout;
use crate::application::customer_resolver::CustomerResolver;
use crate::application::menu_store::MenuStore;
use crate::application::order_history::OrderHistory;
use crate::application::order_writer::OrderWriter;
use crate::application::payment_recorder::PaymentRecorder;
use crate::db::Storage;
use crate::domain::ports::{
    CustomerRepository, MenuRepository, OrderRepository, PaymentRepository, SubmissionLog,
};
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::menu_repo::DieselMenuRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::payment_repo::DieselPaymentRepository;
use crate::infrastructure::submission_log::DieselSubmissionLog;

/// One implementation per storage port.
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub menu: Arc<dyn MenuRepository>,
    pub submissions: Arc<dyn SubmissionLog>,
}

impl Repositories {
    pub fn postgres(storage: &Storage) -> Self {
        Self {
            customers: Arc::new(DieselCustomerRepository::new(storage.clone())),
            orders: Arc::new(DieselOrderRepository::new(storage.clone())),
            payments: Arc::new(DieselPaymentRepository::new(storage.clone())),
            menu: Arc::new(DieselMenuRepository::new(storage.clone())),
            submissions: Arc::new(DieselSubmissionLog::new(storage.clone())),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            customers: store.clone(),
            orders: store.clone(),
            payments: store.clone(),
            menu: store.clone(),
            submissions: store,
        }
    }
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub menu: MenuStore,
    pub orders: OrderWriter,
    pub payments: PaymentRecorder,
    pub history: OrderHistory,
    pub checkout: Checkout,
}

impl AppState {
    pub fn new(repos: Repositories, verify_order_totals: bool) -> Self {
        let resolver = CustomerResolver::new(repos.customers.clone());
        let orders = OrderWriter::new(
            resolver.clone(),
            repos.orders.clone(),
            repos.menu.clone(),
            repos.submissions.clone(),
            verify_order_totals,
        );
        let payments = PaymentRecorder::new(resolver, repos.payments.clone());
        Self {
            menu: MenuStore::new(repos.menu.clone()),
            history: OrderHistory::new(repos.customers.clone(), repos.orders.clone()),
            checkout: Checkout::new(orders.clone(), payments.clone()),
            orders,
            payments,
        }
    }
}
