//! Scheduling service - reconciles generated orders against mutations
//!
//! Enforces the invariant that at most one pipeline of pending preventive
//! occurrences exists per equipment item: stale generated orders are
//! cancelled before regeneration, and a completion appends exactly one new
//! occurrence. The derived due-date field on equipment is recomputed from a
//! fresh repository read after every mutation; there is no in-memory cache
//! to keep in sync.

use std::sync::Arc;

use axle_domain::constants::DEFAULT_HORIZON_YEARS;
use axle_domain::{
    Equipment, NewEquipment, Result, ServiceOrder, ServiceOrderStatus, ServiceOrderType,
};
use chrono::NaiveDate;
use tracing::debug;

use super::horizon::{generate_occurrences, next_occurrence};
use super::ports::{EquipmentRepository, ServiceOrderRepository};

/// Preventive-maintenance scheduling service
pub struct SchedulingService {
    equipment: Arc<dyn EquipmentRepository>,
    orders: Arc<dyn ServiceOrderRepository>,
    horizon_years: u32,
}

impl SchedulingService {
    /// Create a new scheduling service with the default two-year horizon
    pub fn new(
        equipment: Arc<dyn EquipmentRepository>,
        orders: Arc<dyn ServiceOrderRepository>,
    ) -> Self {
        Self { equipment, orders, horizon_years: DEFAULT_HORIZON_YEARS }
    }

    /// Override the horizon covered by the initial occurrence batch
    pub fn with_horizon_years(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    /// Register new equipment and materialize its occurrence pipeline.
    ///
    /// A non-`None` schedule immediately produces a batch of open preventive
    /// orders spanning the horizon from the install date. The equipment
    /// record is persisted exactly once, after the batch, with the derived
    /// due-date field already set.
    pub async fn create_equipment(&self, input: NewEquipment) -> Result<Equipment> {
        input.validate()?;
        let mut equipment = Equipment::from_input(input);

        let occurrences = generate_occurrences(
            equipment.install_date,
            equipment.preventive_schedule,
            self.horizon_years,
        );

        if let Some(first) = occurrences.first() {
            let batch = materialize(&equipment, &occurrences);
            self.orders.add_orders(&batch).await?;
            equipment.next_preventive_maintenance_date = Some(*first);
            debug!(
                equipment_id = %equipment.id,
                orders = batch.len(),
                first_due = %first,
                "generated preventive maintenance batch"
            );
        }

        self.equipment.add_equipment(&equipment).await?;
        Ok(equipment)
    }

    /// Apply an equipment update, regenerating the pipeline when the
    /// schedule changed or the install date moved under a live schedule.
    ///
    /// Regeneration is a full replace: every still-open preventive order is
    /// cancelled (kept in history) and a fresh batch is issued with new ids.
    pub async fn update_equipment(
        &self,
        old: &Equipment,
        input: NewEquipment,
    ) -> Result<Equipment> {
        input.validate()?;
        let mut updated = Equipment {
            id: old.id,
            name: input.name,
            install_date: input.install_date,
            preventive_schedule: input.preventive_schedule,
            status: old.status,
            next_preventive_maintenance_date: old.next_preventive_maintenance_date,
            created_at: old.created_at,
        };

        let schedule_changed = old.preventive_schedule != updated.preventive_schedule;
        let anchor_moved = old.install_date != updated.install_date
            && !updated.preventive_schedule.is_none();

        if schedule_changed || anchor_moved {
            let cancelled = self.cancel_open_preventive_orders(old).await?;
            let occurrences = generate_occurrences(
                updated.install_date,
                updated.preventive_schedule,
                self.horizon_years,
            );

            if occurrences.is_empty() {
                updated.next_preventive_maintenance_date = None;
            } else {
                let batch = materialize(&updated, &occurrences);
                self.orders.add_orders(&batch).await?;
                updated.next_preventive_maintenance_date = occurrences.first().copied();
            }

            debug!(
                equipment_id = %updated.id,
                cancelled,
                regenerated = occurrences.len(),
                "replaced preventive maintenance pipeline"
            );
        }

        self.equipment.update_equipment(&updated).await?;
        Ok(updated)
    }

    /// Replenish the pipeline after a preventive order completed.
    ///
    /// The next occurrence is one interval past the latest scheduled date
    /// among ALL preventive orders for the equipment (any status), so
    /// completing an earlier-dated order while a later one exists never
    /// rewinds the schedule. Replenishment is unbounded, one step at a time.
    pub async fn complete_preventive_order(&self, order: &ServiceOrder) -> Result<()> {
        if order.order_type != ServiceOrderType::Preventive {
            debug!(order_id = %order.id, "completion of non-preventive order, nothing to replenish");
            return Ok(());
        }

        // Equipment deleted after order creation is a tolerated integrity
        // gap: skip generation rather than failing the completion.
        let Some(mut equipment) = self.equipment.find_equipment(order.equipment_id).await? else {
            debug!(
                order_id = %order.id,
                equipment_id = %order.equipment_id,
                "equipment missing at completion time, skipping replenishment"
            );
            return Ok(());
        };

        if equipment.preventive_schedule.is_none() {
            return Ok(());
        }

        let existing = self.orders.orders_for_equipment(equipment.id).await?;
        let last_known = existing
            .iter()
            .filter(|o| o.order_type == ServiceOrderType::Preventive)
            .map(|o| o.scheduled_date)
            .max()
            .unwrap_or(order.scheduled_date);

        if let Some(next_date) = next_occurrence(last_known, equipment.preventive_schedule) {
            let replacement = ServiceOrder::auto_scheduled(
                equipment.id,
                equipment.preventive_schedule,
                next_date,
            );
            self.orders.add_order(&replacement).await?;
            debug!(
                equipment_id = %equipment.id,
                next_due = %next_date,
                "replenished preventive maintenance pipeline"
            );
        }

        let refreshed = self.orders.orders_for_equipment(equipment.id).await?;
        equipment.next_preventive_maintenance_date = earliest_open_preventive(&refreshed);
        self.equipment.update_equipment(&equipment).await?;
        Ok(())
    }

    async fn cancel_open_preventive_orders(&self, equipment: &Equipment) -> Result<usize> {
        let orders = self.orders.orders_for_equipment(equipment.id).await?;
        let mut cancelled = 0;
        for mut order in orders {
            if order.is_open_preventive() {
                order.status = ServiceOrderStatus::Cancelled;
                self.orders.update_order(&order).await?;
                cancelled += 1;
            }
        }
        Ok(cancelled)
    }
}

/// Turn occurrence dates into open auto-scheduled order stubs
fn materialize(equipment: &Equipment, occurrences: &[NaiveDate]) -> Vec<ServiceOrder> {
    occurrences
        .iter()
        .map(|&date| {
            ServiceOrder::auto_scheduled(equipment.id, equipment.preventive_schedule, date)
        })
        .collect()
}

/// Minimum scheduled date among open preventive orders
fn earliest_open_preventive(orders: &[ServiceOrder]) -> Option<NaiveDate> {
    orders.iter().filter(|o| o.is_open_preventive()).map(|o| o.scheduled_date).min()
}
