//! AWS-oriented adapters and handler for the delivery notifier Lambda.
//!
//! This crate owns runtime integration details (the Lambda handler, the SES
//! adapter, configuration and logging). Contract and message primitives live
//! in `delivery_notifier_core` and are re-exported under [`runtime`].

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod observability;

pub mod runtime {
    pub use delivery_notifier_core::{contract, message};
}
