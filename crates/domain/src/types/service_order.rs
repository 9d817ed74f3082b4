//! Service order types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AxleError;
use crate::types::equipment::PreventiveSchedule;

/// Kind of work a service order covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderType {
    Preventive,
    Corrective,
    Calibration,
}

impl ServiceOrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preventive => "preventive",
            Self::Corrective => "corrective",
            Self::Calibration => "calibration",
        }
    }
}

impl FromStr for ServiceOrderType {
    type Err = AxleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preventive" => Ok(Self::Preventive),
            "corrective" => Ok(Self::Corrective),
            "calibration" => Ok(Self::Calibration),
            other => Err(AxleError::InvalidInput(format!("unknown order type: {other}"))),
        }
    }
}

/// Lifecycle state of a service order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// True while the order still represents planned or active work
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

impl fmt::Display for ServiceOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceOrderStatus {
    type Err = AxleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AxleError::InvalidInput(format!("unknown order status: {other}"))),
        }
    }
}

/// How a service order came to exist
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderOrigin {
    #[default]
    Manual,
    AutoScheduled,
}

impl OrderOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::AutoScheduled => "auto_scheduled",
        }
    }
}

impl FromStr for OrderOrigin {
    type Err = AxleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "auto_scheduled" => Ok(Self::AutoScheduled),
            other => Err(AxleError::InvalidInput(format!("unknown order origin: {other}"))),
        }
    }
}

/// A unit of maintenance work planned or performed against one equipment item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceOrder {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub order_type: ServiceOrderType,
    pub status: ServiceOrderStatus,
    pub origin: OrderOrigin,
    pub scheduled_date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ServiceOrder {
    /// Build an open preventive order stub for one generated occurrence.
    ///
    /// The description doubles as the audit trail distinguishing generated
    /// orders from manually created ones.
    pub fn auto_scheduled(
        equipment_id: Uuid,
        schedule: PreventiveSchedule,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            equipment_id,
            order_type: ServiceOrderType::Preventive,
            status: ServiceOrderStatus::Open,
            origin: OrderOrigin::AutoScheduled,
            scheduled_date,
            description: format!("Automatically scheduled preventive maintenance ({schedule})"),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Build an open, manually created order
    pub fn manual(
        equipment_id: Uuid,
        order_type: ServiceOrderType,
        scheduled_date: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            equipment_id,
            order_type,
            status: ServiceOrderStatus::Open,
            origin: OrderOrigin::Manual,
            scheduled_date,
            description,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// True for orders the scheduler may cancel or supersede
    pub fn is_open_preventive(&self) -> bool {
        self.order_type == ServiceOrderType::Preventive && self.status == ServiceOrderStatus::Open
    }
}
