pub mod cart;
pub mod customer;
pub mod errors;
pub mod menu;
pub mod order;
pub mod payment;
pub mod ports;
pub mod submission;
