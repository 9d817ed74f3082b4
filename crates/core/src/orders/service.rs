//! Order lifecycle service - the general order-update path
//!
//! The scheduler owns the due-date field and the generated order set; this
//! service owns everything else about an order's lifecycle, including the
//! equipment status side effects the scheduler must not fight.

use std::sync::Arc;

use axle_domain::constants::MAX_ORDER_DESCRIPTION_LENGTH;
use axle_domain::{
    AxleError, Result, ServiceOrder, ServiceOrderStatus, ServiceOrderType,
};
use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use super::policy;
use crate::scheduling::ports::{EquipmentRepository, ServiceOrderRepository};
use crate::scheduling::SchedulingService;

/// Service-order lifecycle service
pub struct OrderLifecycleService {
    equipment: Arc<dyn EquipmentRepository>,
    orders: Arc<dyn ServiceOrderRepository>,
    scheduler: Arc<SchedulingService>,
}

impl OrderLifecycleService {
    /// Create a new lifecycle service
    pub fn new(
        equipment: Arc<dyn EquipmentRepository>,
        orders: Arc<dyn ServiceOrderRepository>,
        scheduler: Arc<SchedulingService>,
    ) -> Self {
        Self { equipment, orders, scheduler }
    }

    /// Open a manually created order against existing equipment
    pub async fn open_order(
        &self,
        equipment_id: Uuid,
        order_type: ServiceOrderType,
        scheduled_date: NaiveDate,
        description: String,
    ) -> Result<ServiceOrder> {
        if description.trim().is_empty() {
            return Err(AxleError::InvalidInput("order description must not be empty".into()));
        }
        if description.len() > MAX_ORDER_DESCRIPTION_LENGTH {
            return Err(AxleError::InvalidInput(format!(
                "order description exceeds {MAX_ORDER_DESCRIPTION_LENGTH} characters"
            )));
        }

        let Some(mut equipment) = self.equipment.find_equipment(equipment_id).await? else {
            return Err(AxleError::NotFound(format!("equipment {equipment_id}")));
        };

        let order = ServiceOrder::manual(equipment_id, order_type, scheduled_date, description);
        self.orders.add_order(&order).await?;

        if let Some(status) = policy::status_after_transition(&order) {
            equipment.status = status;
            self.equipment.update_equipment(&equipment).await?;
        }

        debug!(order_id = %order.id, equipment_id = %equipment_id, "opened manual order");
        Ok(order)
    }

    /// Transition an order to a new status, applying equipment status side
    /// effects and, for a completed preventive order, scheduler
    /// replenishment.
    pub async fn transition_order(
        &self,
        order_id: Uuid,
        new_status: ServiceOrderStatus,
    ) -> Result<ServiceOrder> {
        let Some(mut order) = self.orders.find_order(order_id).await? else {
            return Err(AxleError::NotFound(format!("service order {order_id}")));
        };

        if order.status == new_status {
            return Ok(order);
        }

        order.status = new_status;
        order.completed_at = match new_status {
            ServiceOrderStatus::Completed => Some(Utc::now()),
            _ => None,
        };
        self.orders.update_order(&order).await?;

        if let Some(status) = policy::status_after_transition(&order) {
            if let Some(mut equipment) = self.equipment.find_equipment(order.equipment_id).await?
            {
                equipment.status = status;
                self.equipment.update_equipment(&equipment).await?;
            }
        }

        if new_status == ServiceOrderStatus::Completed
            && order.order_type == ServiceOrderType::Preventive
        {
            self.scheduler.complete_preventive_order(&order).await?;
        }

        debug!(order_id = %order.id, status = %new_status, "order transitioned");
        Ok(order)
    }
}
