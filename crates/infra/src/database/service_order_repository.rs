//! SQLite-backed implementation of the ServiceOrderRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use axle_core::ServiceOrderRepository;
use axle_domain::{AxleError, Result, ServiceOrder};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::DbManager;
use super::rows::{encode_date, ServiceOrderRow};
use crate::errors::InfraError;

const SELECT_COLUMNS: &str = "id, equipment_id, order_type, status, origin, scheduled_date, \
     description, created_at, completed_at";

const UPSERT_SQL: &str = "INSERT INTO service_orders (
        id, equipment_id, order_type, status, origin, scheduled_date,
        description, created_at, completed_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(id) DO UPDATE SET
        status = excluded.status,
        scheduled_date = excluded.scheduled_date,
        description = excluded.description,
        completed_at = excluded.completed_at";

/// SQLite implementation of ServiceOrderRepository
pub struct SqliteOrderRepository {
    db: Arc<DbManager>,
}

impl SqliteOrderRepository {
    /// Create a new service-order repository
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn execute_upsert(conn: &Connection, order: &ServiceOrder) -> Result<()> {
    conn.execute(
        UPSERT_SQL,
        params![
            order.id.to_string(),
            order.equipment_id.to_string(),
            order.order_type.as_str(),
            order.status.as_str(),
            order.origin.as_str(),
            encode_date(order.scheduled_date),
            order.description,
            order.created_at.timestamp(),
            order.completed_at.map(|ts| ts.timestamp()),
        ],
    )
    .map_err(InfraError::from)?;
    Ok(())
}

#[async_trait]
impl ServiceOrderRepository for SqliteOrderRepository {
    #[instrument(skip(self))]
    async fn find_order(&self, id: Uuid) -> Result<Option<ServiceOrder>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let row = conn
                .query_row(
                    &format!("SELECT {SELECT_COLUMNS} FROM service_orders WHERE id = ?1"),
                    params![id.to_string()],
                    ServiceOrderRow::from_row,
                )
                .optional()
                .map_err(InfraError::from)?;

            row.map(ServiceOrderRow::into_domain).transpose()
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn orders_for_equipment(&self, equipment_id: Uuid) -> Result<Vec<ServiceOrder>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM service_orders
                     WHERE equipment_id = ?1
                     ORDER BY scheduled_date ASC"
                ))
                .map_err(InfraError::from)?;

            let rows = stmt
                .query_map(params![equipment_id.to_string()], ServiceOrderRow::from_row)
                .map_err(InfraError::from)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(InfraError::from)?;

            rows.into_iter().map(ServiceOrderRow::into_domain).collect()
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn add_order(&self, order: &ServiceOrder) -> Result<()> {
        let db = self.db.clone();
        let order = order.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            execute_upsert(&conn, &order)?;
            debug!(order_id = %order.id, equipment_id = %order.equipment_id, "inserted order");
            Ok(())
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, orders), fields(count = orders.len()))]
    async fn add_orders(&self, orders: &[ServiceOrder]) -> Result<()> {
        if orders.is_empty() {
            return Ok(());
        }

        let db = self.db.clone();
        let orders = orders.to_vec();
        tokio::task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;
            // Generated batches land atomically: a failed insert rolls the
            // whole batch back instead of leaving a partial horizon.
            let tx = conn.transaction().map_err(InfraError::from)?;
            for order in &orders {
                execute_upsert(&tx, order)?;
            }
            tx.commit().map_err(InfraError::from)?;

            debug!(count = orders.len(), "persisted generated order batch");
            Ok(())
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn update_order(&self, order: &ServiceOrder) -> Result<()> {
        let db = self.db.clone();
        let order = order.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            execute_upsert(&conn, &order)?;
            debug!(order_id = %order.id, status = %order.status, "updated order");
            Ok(())
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use axle_domain::{PreventiveSchedule, ServiceOrderStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;

    fn setup_test_db() -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).unwrap();
        manager.run_migrations().unwrap();

        (Arc::new(manager), temp_dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn insert_and_find_round_trips() {
        let (db, _temp) = setup_test_db();
        let repo = SqliteOrderRepository::new(db);

        let order = ServiceOrder::auto_scheduled(
            Uuid::now_v7(),
            PreventiveSchedule::Monthly,
            date(2024, 2, 15),
        );
        repo.add_order(&order).await.unwrap();

        // created_at is stored with second precision, so compare fields.
        let found = repo.find_order(order.id).await.unwrap().unwrap();
        assert_eq!(found.id, order.id);
        assert_eq!(found.equipment_id, order.equipment_id);
        assert_eq!(found.order_type, order.order_type);
        assert_eq!(found.status, order.status);
        assert_eq!(found.origin, order.origin);
        assert_eq!(found.scheduled_date, order.scheduled_date);
        assert_eq!(found.description, order.description);
        assert!(found.completed_at.is_none());
    }

    #[tokio::test]
    async fn batch_insert_persists_every_order_in_date_order() {
        let (db, _temp) = setup_test_db();
        let repo = SqliteOrderRepository::new(db);

        let equipment_id = Uuid::now_v7();
        let batch: Vec<_> = (1..=6)
            .map(|month| {
                ServiceOrder::auto_scheduled(
                    equipment_id,
                    PreventiveSchedule::Monthly,
                    date(2024, month, 15),
                )
            })
            .collect();
        repo.add_orders(&batch).await.unwrap();

        let found = repo.orders_for_equipment(equipment_id).await.unwrap();
        assert_eq!(found.len(), 6);
        assert_eq!(found[0].scheduled_date, date(2024, 1, 15));
        assert_eq!(found[5].scheduled_date, date(2024, 6, 15));
    }

    #[tokio::test]
    async fn update_changes_status_in_place() {
        let (db, _temp) = setup_test_db();
        let repo = SqliteOrderRepository::new(db);

        let mut order = ServiceOrder::auto_scheduled(
            Uuid::now_v7(),
            PreventiveSchedule::Annual,
            date(2025, 1, 15),
        );
        repo.add_order(&order).await.unwrap();

        order.status = ServiceOrderStatus::Cancelled;
        repo.update_order(&order).await.unwrap();

        let found = repo.find_order(order.id).await.unwrap().unwrap();
        assert_eq!(found.status, ServiceOrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn orders_for_other_equipment_are_not_returned() {
        let (db, _temp) = setup_test_db();
        let repo = SqliteOrderRepository::new(db);

        let mine = Uuid::now_v7();
        let theirs = Uuid::now_v7();
        repo.add_order(&ServiceOrder::auto_scheduled(
            mine,
            PreventiveSchedule::Monthly,
            date(2024, 2, 15),
        ))
        .await
        .unwrap();
        repo.add_order(&ServiceOrder::auto_scheduled(
            theirs,
            PreventiveSchedule::Monthly,
            date(2024, 2, 20),
        ))
        .await
        .unwrap();

        let found = repo.orders_for_equipment(mine).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].equipment_id, mine);
    }
}
