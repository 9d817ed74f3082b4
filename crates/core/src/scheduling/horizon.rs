//! Horizon generation - pure occurrence-date arithmetic
//!
//! Month stepping uses calendar-month addition, never `N * 30 days`, so the
//! day-of-month is preserved across months of different lengths. When a step
//! overflows into a shorter month, chrono clamps to the last valid day of
//! the target month (2024-01-31 + 1 month = 2024-02-29); the cursor keeps
//! the clamped day on subsequent steps.

use axle_domain::constants::MONTHS_PER_YEAR;
use axle_domain::PreventiveSchedule;
use chrono::{Months, NaiveDate};

/// Compute the ordered sequence of occurrence dates for one equipment item.
///
/// Advances a cursor from `install_date` by the schedule's month count,
/// emitting each advanced date until the candidate passes
/// `install_date + horizon_years`. The bound is exclusive via `>`: an
/// occurrence landing exactly on the boundary date is included.
pub fn generate_occurrences(
    install_date: NaiveDate,
    schedule: PreventiveSchedule,
    horizon_years: u32,
) -> Vec<NaiveDate> {
    let step = schedule.interval_months();
    if step == 0 {
        return Vec::new();
    }

    let Some(end_date) =
        install_date.checked_add_months(Months::new(horizon_years * MONTHS_PER_YEAR))
    else {
        return Vec::new();
    };

    let mut occurrences = Vec::new();
    let mut cursor = install_date;
    while let Some(candidate) = cursor.checked_add_months(Months::new(step)) {
        if candidate > end_date {
            break;
        }
        occurrences.push(candidate);
        cursor = candidate;
    }
    occurrences
}

/// Advance exactly one schedule step past `after`.
///
/// Used by replenishment after an order completes; unlike the initial batch
/// this is not horizon-bounded. Returns `None` for a `None` schedule or on
/// calendar overflow.
pub fn next_occurrence(after: NaiveDate, schedule: PreventiveSchedule) -> Option<NaiveDate> {
    let step = schedule.interval_months();
    if step == 0 {
        return None;
    }
    after.checked_add_months(Months::new(step))
}
