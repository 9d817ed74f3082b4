//! Service-order lifecycle
//!
//! The general order-update path: status transitions, the equipment
//! operational-status policy they drive, and composition with the
//! scheduler's replenishment on preventive completions.

pub mod policy;
pub mod service;

pub use service::OrderLifecycleService;
