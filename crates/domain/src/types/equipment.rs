//! Equipment registry types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MAX_EQUIPMENT_NAME_LENGTH;
use crate::errors::AxleError;

/// PreventiveSchedule: the recurrence interval for automatic maintenance
///
/// Each variant maps to a fixed calendar-month count. `None` disables
/// recurring generation entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreventiveSchedule {
    #[default]
    None,
    Monthly,
    Bimonthly,
    Trimonthly,
    Semiannual,
    Annual,
}

impl PreventiveSchedule {
    /// Returns the calendar-month step between two occurrences, 0 for `None`
    pub fn interval_months(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Monthly => 1,
            Self::Bimonthly => 2,
            Self::Trimonthly => 3,
            Self::Semiannual => 6,
            Self::Annual => 12,
        }
    }

    /// True when the schedule generates no occurrences
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Storage/display token for the schedule
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Monthly => "monthly",
            Self::Bimonthly => "bimonthly",
            Self::Trimonthly => "trimonthly",
            Self::Semiannual => "semiannual",
            Self::Annual => "annual",
        }
    }
}

impl fmt::Display for PreventiveSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreventiveSchedule {
    type Err = AxleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "monthly" => Ok(Self::Monthly),
            "bimonthly" => Ok(Self::Bimonthly),
            "trimonthly" => Ok(Self::Trimonthly),
            "semiannual" => Ok(Self::Semiannual),
            "annual" => Ok(Self::Annual),
            other => {
                Err(AxleError::InvalidInput(format!("unknown preventive schedule: {other}")))
            }
        }
    }
}

/// Operational status of a piece of equipment
///
/// Owned by the order-lifecycle status policy; the scheduler never writes it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Operational,
    InMaintenance,
    NeedsRepair,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::InMaintenance => "in_maintenance",
            Self::NeedsRepair => "needs_repair",
        }
    }
}

impl FromStr for EquipmentStatus {
    type Err = AxleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(Self::Operational),
            "in_maintenance" => Ok(Self::InMaintenance),
            "needs_repair" => Ok(Self::NeedsRepair),
            other => Err(AxleError::InvalidInput(format!("unknown equipment status: {other}"))),
        }
    }
}

/// A registered piece of equipment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    pub install_date: NaiveDate,
    pub preventive_schedule: PreventiveSchedule,
    pub status: EquipmentStatus,
    /// Derived: scheduled date of the earliest still-open generated
    /// preventive order, `None` when no open preventive order exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_preventive_maintenance_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Equipment {
    /// Materialize a new equipment record from validated input
    pub fn from_input(input: NewEquipment) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            install_date: input.install_date,
            preventive_schedule: input.preventive_schedule,
            status: EquipmentStatus::Operational,
            next_preventive_maintenance_date: None,
            created_at: Utc::now(),
        }
    }
}

/// Input payload for registering equipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEquipment {
    pub name: String,
    pub install_date: NaiveDate,
    #[serde(default)]
    pub preventive_schedule: PreventiveSchedule,
}

impl NewEquipment {
    /// Boundary validation for registration input
    pub fn validate(&self) -> Result<(), AxleError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AxleError::InvalidInput("equipment name must not be empty".into()));
        }
        if name.len() > MAX_EQUIPMENT_NAME_LENGTH {
            return Err(AxleError::InvalidInput(format!(
                "equipment name exceeds {MAX_EQUIPMENT_NAME_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_maps_to_month_counts() {
        assert_eq!(PreventiveSchedule::None.interval_months(), 0);
        assert_eq!(PreventiveSchedule::Monthly.interval_months(), 1);
        assert_eq!(PreventiveSchedule::Bimonthly.interval_months(), 2);
        assert_eq!(PreventiveSchedule::Trimonthly.interval_months(), 3);
        assert_eq!(PreventiveSchedule::Semiannual.interval_months(), 6);
        assert_eq!(PreventiveSchedule::Annual.interval_months(), 12);
    }

    #[test]
    fn schedule_round_trips_through_storage_token() {
        for schedule in [
            PreventiveSchedule::None,
            PreventiveSchedule::Monthly,
            PreventiveSchedule::Bimonthly,
            PreventiveSchedule::Trimonthly,
            PreventiveSchedule::Semiannual,
            PreventiveSchedule::Annual,
        ] {
            let parsed: PreventiveSchedule = schedule.as_str().parse().unwrap();
            assert_eq!(parsed, schedule);
        }
    }

    #[test]
    fn unknown_schedule_token_is_rejected() {
        let err = "weekly".parse::<PreventiveSchedule>().unwrap_err();
        assert!(matches!(err, AxleError::InvalidInput(_)));
    }

    #[test]
    fn empty_name_fails_validation() {
        let input = NewEquipment {
            name: "   ".into(),
            install_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            preventive_schedule: PreventiveSchedule::Monthly,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn from_input_starts_operational_without_due_date() {
        let input = NewEquipment {
            name: "Compressor A".into(),
            install_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            preventive_schedule: PreventiveSchedule::Monthly,
        };
        let equipment = Equipment::from_input(input);

        assert_eq!(equipment.status, EquipmentStatus::Operational);
        assert!(equipment.next_preventive_maintenance_date.is_none());
    }
}
