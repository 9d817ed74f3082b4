//! Equipment operational-status policy
//!
//! Status transitions are driven by order status transitions, never by the
//! scheduler creating orders. Kept as a pure collaborator so the lifecycle
//! service composes with it instead of duplicating the rules.

use axle_domain::{EquipmentStatus, ServiceOrder, ServiceOrderStatus, ServiceOrderType};

/// Equipment status implied by an order's status transition.
///
/// - completing any order returns the equipment to `Operational`
/// - an open or in-progress corrective order means `NeedsRepair`
/// - any other open or in-progress order means `InMaintenance`
/// - a cancellation drives no transition
pub fn status_after_transition(order: &ServiceOrder) -> Option<EquipmentStatus> {
    match order.status {
        ServiceOrderStatus::Completed => Some(EquipmentStatus::Operational),
        ServiceOrderStatus::Open | ServiceOrderStatus::InProgress => {
            Some(match order.order_type {
                ServiceOrderType::Corrective => EquipmentStatus::NeedsRepair,
                _ => EquipmentStatus::InMaintenance,
            })
        }
        ServiceOrderStatus::Cancelled => None,
    }
}
