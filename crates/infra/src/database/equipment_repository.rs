//! SQLite-backed implementation of the EquipmentRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use axle_core::EquipmentRepository;
use axle_domain::{AxleError, Equipment, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::DbManager;
use super::rows::{encode_date, EquipmentRow};
use crate::errors::InfraError;

const SELECT_COLUMNS: &str = "id, name, install_date, preventive_schedule, status, \
     next_preventive_maintenance_date, created_at";

/// SQLite implementation of EquipmentRepository
pub struct SqliteEquipmentRepository {
    db: Arc<DbManager>,
}

impl SqliteEquipmentRepository {
    /// Create a new equipment repository
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EquipmentRepository for SqliteEquipmentRepository {
    #[instrument(skip(self))]
    async fn find_equipment(&self, id: Uuid) -> Result<Option<Equipment>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let row = conn
                .query_row(
                    &format!("SELECT {SELECT_COLUMNS} FROM equipment WHERE id = ?1"),
                    params![id.to_string()],
                    EquipmentRow::from_row,
                )
                .optional()
                .map_err(InfraError::from)?;

            row.map(EquipmentRow::into_domain).transpose()
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn list_equipment(&self) -> Result<Vec<Equipment>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!("SELECT {SELECT_COLUMNS} FROM equipment ORDER BY created_at"))
                .map_err(InfraError::from)?;

            let rows = stmt
                .query_map([], EquipmentRow::from_row)
                .map_err(InfraError::from)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(InfraError::from)?;

            rows.into_iter().map(EquipmentRow::into_domain).collect()
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, equipment), fields(equipment_id = %equipment.id))]
    async fn add_equipment(&self, equipment: &Equipment) -> Result<()> {
        let db = self.db.clone();
        let equipment = equipment.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO equipment (
                    id, name, install_date, preventive_schedule, status,
                    next_preventive_maintenance_date, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    equipment.id.to_string(),
                    equipment.name,
                    encode_date(equipment.install_date),
                    equipment.preventive_schedule.as_str(),
                    equipment.status.as_str(),
                    equipment.next_preventive_maintenance_date.map(encode_date),
                    equipment.created_at.timestamp(),
                ],
            )
            .map_err(InfraError::from)?;

            debug!(equipment_id = %equipment.id, "inserted equipment");
            Ok(())
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, equipment), fields(equipment_id = %equipment.id))]
    async fn update_equipment(&self, equipment: &Equipment) -> Result<()> {
        let db = self.db.clone();
        let equipment = equipment.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO equipment (
                    id, name, install_date, preventive_schedule, status,
                    next_preventive_maintenance_date, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    install_date = excluded.install_date,
                    preventive_schedule = excluded.preventive_schedule,
                    status = excluded.status,
                    next_preventive_maintenance_date = excluded.next_preventive_maintenance_date",
                params![
                    equipment.id.to_string(),
                    equipment.name,
                    encode_date(equipment.install_date),
                    equipment.preventive_schedule.as_str(),
                    equipment.status.as_str(),
                    equipment.next_preventive_maintenance_date.map(encode_date),
                    equipment.created_at.timestamp(),
                ],
            )
            .map_err(InfraError::from)?;

            debug!(equipment_id = %equipment.id, "updated equipment");
            Ok(())
        })
        .await
        .map_err(|e| AxleError::Internal(e.to_string()))?
    }
}
