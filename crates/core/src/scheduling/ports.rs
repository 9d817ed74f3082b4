//! Port interfaces for the scheduler's persistence collaborators
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use axle_domain::{Equipment, Result, ServiceOrder};
use uuid::Uuid;

/// Trait for persisting equipment records
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    /// Look up one equipment record by id
    async fn find_equipment(&self, id: Uuid) -> Result<Option<Equipment>>;

    /// Get all registered equipment
    async fn list_equipment(&self) -> Result<Vec<Equipment>>;

    /// Insert a new equipment record
    async fn add_equipment(&self, equipment: &Equipment) -> Result<()>;

    /// Upsert an equipment record by primary key
    async fn update_equipment(&self, equipment: &Equipment) -> Result<()>;
}

/// Trait for persisting service orders
#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    /// Look up one service order by id
    async fn find_order(&self, id: Uuid) -> Result<Option<ServiceOrder>>;

    /// Get every service order belonging to one equipment item
    async fn orders_for_equipment(&self, equipment_id: Uuid) -> Result<Vec<ServiceOrder>>;

    /// Insert a single service order
    async fn add_order(&self, order: &ServiceOrder) -> Result<()>;

    /// Insert a generated batch of service orders in one call
    async fn add_orders(&self, orders: &[ServiceOrder]) -> Result<()>;

    /// Upsert a service order by primary key
    async fn update_order(&self, order: &ServiceOrder) -> Result<()>;
}
