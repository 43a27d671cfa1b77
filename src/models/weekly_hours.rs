//! Weekly hours aggregate model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A derived, persisted hours aggregate for one employee over one week.
///
/// Keyed by (employee, organization, week_start, week_end); recomputing the
/// same window replaces the existing row rather than appending a duplicate,
/// so downstream payslip grouping never double-counts a week.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WeeklyHours;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let week = WeeklyHours {
///     employee_id: 7,
///     organization_id: 1,
///     week_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     week_end: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
///     scheduled_hours: Decimal::new(40, 0),
///     worked_hours: Decimal::new(45, 0),
///     overtime_hours: Decimal::new(5, 0),
/// };
/// assert_eq!(week.overtime_hours, Decimal::new(5, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// The employee the aggregate belongs to.
    pub employee_id: i64,
    /// The organization the aggregate belongs to.
    pub organization_id: i64,
    /// First date of the week window (inclusive).
    pub week_start: NaiveDate,
    /// Last date of the week window (inclusive).
    pub week_end: NaiveDate,
    /// Hours derived from planned shifts in the window.
    pub scheduled_hours: Decimal,
    /// Hours derived from closed punch sessions in the window.
    pub worked_hours: Decimal,
    /// Hours worked beyond the weekly threshold.
    pub overtime_hours: Decimal,
}

impl WeeklyHours {
    /// Returns true when this aggregate covers the same key as `other`.
    pub fn same_window(&self, other: &WeeklyHours) -> bool {
        self.employee_id == other.employee_id
            && self.organization_id == other.organization_id
            && self.week_start == other.week_start
            && self.week_end == other.week_end
    }

    /// Returns true when the week window overlaps the given period.
    ///
    /// Overlap test: `week_start <= period_end && week_end >= period_start`.
    pub fn overlaps(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        self.week_start <= period_end && self.week_end >= period_start
    }
}
