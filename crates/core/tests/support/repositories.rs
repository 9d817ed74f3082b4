//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for the scheduler's persistence ports, enabling
//! deterministic unit tests without database dependencies.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axle_core::{EquipmentRepository, ServiceOrderRepository};
use axle_domain::{AxleError, Equipment, Result as DomainResult, ServiceOrder};
use uuid::Uuid;

/// In-memory mock for `EquipmentRepository`.
///
/// Records every write so tests can assert on persisted state and on how
/// often the equipment row was touched.
#[derive(Default, Clone)]
pub struct MockEquipmentRepository {
    records: Arc<Mutex<Vec<Equipment>>>,
    add_calls: Arc<AtomicUsize>,
}

impl MockEquipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding the mock with one equipment record.
    pub fn with_equipment(self, equipment: Equipment) -> Self {
        self.records.lock().expect("mock lock poisoned").push(equipment);
        self
    }

    /// Current persisted state of one equipment record.
    pub fn equipment(&self, id: Uuid) -> Option<Equipment> {
        self.records.lock().expect("mock lock poisoned").iter().find(|e| e.id == id).cloned()
    }

    /// Number of `add_equipment` calls observed.
    pub fn add_count(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EquipmentRepository for MockEquipmentRepository {
    async fn find_equipment(&self, id: Uuid) -> DomainResult<Option<Equipment>> {
        Ok(self.equipment(id))
    }

    async fn list_equipment(&self) -> DomainResult<Vec<Equipment>> {
        Ok(self.records.lock().expect("mock lock poisoned").clone())
    }

    async fn add_equipment(&self, equipment: &Equipment) -> DomainResult<()> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.records.lock().expect("mock lock poisoned").push(equipment.clone());
        Ok(())
    }

    async fn update_equipment(&self, equipment: &Equipment) -> DomainResult<()> {
        let mut records = self.records.lock().expect("mock lock poisoned");
        match records.iter_mut().find(|e| e.id == equipment.id) {
            Some(existing) => *existing = equipment.clone(),
            None => records.push(equipment.clone()),
        }
        Ok(())
    }
}

/// In-memory mock for `ServiceOrderRepository`.
///
/// Supports write-failure injection for error-propagation tests.
#[derive(Default, Clone)]
pub struct MockOrderRepository {
    records: Arc<Mutex<Vec<ServiceOrder>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding the mock with one order.
    pub fn with_order(self, order: ServiceOrder) -> Self {
        self.records.lock().expect("mock lock poisoned").push(order);
        self
    }

    /// Make every subsequent write fail with a database error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every persisted order.
    pub fn orders(&self) -> Vec<ServiceOrder> {
        self.records.lock().expect("mock lock poisoned").clone()
    }

    /// Snapshot of orders belonging to one equipment item.
    pub fn orders_for(&self, equipment_id: Uuid) -> Vec<ServiceOrder> {
        self.orders().into_iter().filter(|o| o.equipment_id == equipment_id).collect()
    }

    fn check_writable(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AxleError::Database("injected write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceOrderRepository for MockOrderRepository {
    async fn find_order(&self, id: Uuid) -> DomainResult<Option<ServiceOrder>> {
        Ok(self.records.lock().expect("mock lock poisoned").iter().find(|o| o.id == id).cloned())
    }

    async fn orders_for_equipment(&self, equipment_id: Uuid) -> DomainResult<Vec<ServiceOrder>> {
        Ok(self.orders_for(equipment_id))
    }

    async fn add_order(&self, order: &ServiceOrder) -> DomainResult<()> {
        self.check_writable()?;
        self.records.lock().expect("mock lock poisoned").push(order.clone());
        Ok(())
    }

    async fn add_orders(&self, orders: &[ServiceOrder]) -> DomainResult<()> {
        self.check_writable()?;
        self.records.lock().expect("mock lock poisoned").extend_from_slice(orders);
        Ok(())
    }

    async fn update_order(&self, order: &ServiceOrder) -> DomainResult<()> {
        self.check_writable()?;
        let mut records = self.records.lock().expect("mock lock poisoned");
        match records.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order.clone(),
            None => records.push(order.clone()),
        }
        Ok(())
    }
}
