//! Row ↔ domain conversions shared by the SQLite repositories.
//!
//! Raw column values are read in `query_map` closures and converted to
//! domain types outside rusqlite's error channel, so a malformed row
//! surfaces as a database error instead of being silently dropped.

use axle_domain::{AxleError, Equipment, Result, ServiceOrder};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw `equipment` table row
pub(crate) struct EquipmentRow {
    id: String,
    name: String,
    install_date: String,
    preventive_schedule: String,
    status: String,
    next_preventive_maintenance_date: Option<String>,
    created_at: i64,
}

impl EquipmentRow {
    /// Column order: id, name, install_date, preventive_schedule, status,
    /// next_preventive_maintenance_date, created_at
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            install_date: row.get(2)?,
            preventive_schedule: row.get(3)?,
            status: row.get(4)?,
            next_preventive_maintenance_date: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    pub(crate) fn into_domain(self) -> Result<Equipment> {
        Ok(Equipment {
            id: parse_uuid(&self.id)?,
            name: self.name,
            install_date: parse_date(&self.install_date)?,
            preventive_schedule: self.preventive_schedule.parse()?,
            status: self.status.parse()?,
            next_preventive_maintenance_date: self
                .next_preventive_maintenance_date
                .as_deref()
                .map(parse_date)
                .transpose()?,
            created_at: parse_timestamp(self.created_at)?,
        })
    }
}

/// Raw `service_orders` table row
pub(crate) struct ServiceOrderRow {
    id: String,
    equipment_id: String,
    order_type: String,
    status: String,
    origin: String,
    scheduled_date: String,
    description: String,
    created_at: i64,
    completed_at: Option<i64>,
}

impl ServiceOrderRow {
    /// Column order: id, equipment_id, order_type, status, origin,
    /// scheduled_date, description, created_at, completed_at
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            equipment_id: row.get(1)?,
            order_type: row.get(2)?,
            status: row.get(3)?,
            origin: row.get(4)?,
            scheduled_date: row.get(5)?,
            description: row.get(6)?,
            created_at: row.get(7)?,
            completed_at: row.get(8)?,
        })
    }

    pub(crate) fn into_domain(self) -> Result<ServiceOrder> {
        Ok(ServiceOrder {
            id: parse_uuid(&self.id)?,
            equipment_id: parse_uuid(&self.equipment_id)?,
            order_type: self.order_type.parse()?,
            status: self.status.parse()?,
            origin: self.origin.parse()?,
            scheduled_date: parse_date(&self.scheduled_date)?,
            description: self.description,
            created_at: parse_timestamp(self.created_at)?,
            completed_at: self.completed_at.map(parse_timestamp).transpose()?,
        })
    }
}

/// Storage encoding for calendar dates
pub(crate) fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AxleError::Database(format!("invalid uuid in row: {e}")))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AxleError::Database(format!("invalid date in row: {e}")))
}

fn parse_timestamp(ts: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| AxleError::Database(format!("invalid timestamp in row: {ts}")))
}
