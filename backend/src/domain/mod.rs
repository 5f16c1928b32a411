//! # Domain Module
//!
//! Business logic for the payment tracker, written against the storage
//! layer's [`PaymentRepository`](crate::storage::PaymentRepository):
//!
//! - [`PaymentService`]: add, update, delete and list payments
//! - [`StatsService`]: totals, per-wallet and per-month aggregation
//! - [`PaymentValidator`]: checks raw form input before it reaches the store
//! - [`date_utils`]: month labels used by the aggregation

pub mod date_utils;
pub mod payment_service;
pub mod stats_service;
pub mod validation;

pub use date_utils::MonthLabelLocale;
pub use payment_service::PaymentService;
pub use stats_service::StatsService;
pub use validation::PaymentValidator;
