//! Shared helpers for core integration tests

pub mod repositories;

use axle_domain::{NewEquipment, PreventiveSchedule};
use chrono::NaiveDate;

/// Build a registration input for tests
pub fn equipment_input(
    name: &str,
    install: (i32, u32, u32),
    schedule: PreventiveSchedule,
) -> NewEquipment {
    NewEquipment {
        name: name.to_string(),
        install_date: date(install.0, install.1, install.2),
        preventive_schedule: schedule,
    }
}

/// Shorthand for a calendar date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}
