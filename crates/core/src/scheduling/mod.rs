//! Preventive-maintenance scheduling
//!
//! Two collaborating pieces: the horizon generator (pure date arithmetic)
//! and the scheduling service that reconciles the generated order set
//! against equipment mutations and order completions.

pub mod horizon;
pub mod ports;
pub mod service;

pub use service::SchedulingService;
