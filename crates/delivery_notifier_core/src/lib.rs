//! Delivery notification domain primitives.
//!
//! This crate owns the invocation contract (event normalization and field
//! validation) and the construction of the delivery-update email. It excludes
//! AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod message;
