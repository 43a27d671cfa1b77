//! Weekly hours aggregation.
//!
//! Sums one employee's scheduled hours (from shifts) and worked hours (from
//! closed punch sessions) over a week window, derives weekly overtime, and
//! upserts the result as the week's single aggregate row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::WeeklyHours;
use crate::store::{PunchStore, ShiftStore, WeeklyHoursStore};

use super::clock::{sum_durations, ParsePolicy};

/// Weekly overtime threshold in hours.
///
/// Hours worked beyond this in one week window count as weekly overtime.
/// Distinct from the daily threshold applied at punch-out; the two policies
/// are independent and deliberately not unified.
pub const WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Computes and persists the hours aggregate for one employee and one week.
///
/// Scheduled hours come from shifts dated within `[week_start, week_end]`;
/// worked hours from closed punch sessions in the same range. Punches still
/// open are excluded rather than read through a placeholder punch-out time.
/// Overtime is `max(0, worked - 40)`.
///
/// The result is upserted: recomputing the same window replaces the stored
/// row, so repeated invocations are idempotent. An empty window yields an
/// all-zero aggregate, not an error.
///
/// # Errors
///
/// - [`PayrollError::InvalidPeriod`] when `week_end` precedes `week_start`,
///   rejected before any store access.
/// - [`PayrollError::MalformedTime`] when a shift time fails to parse and
///   `policy` is [`ParsePolicy::Abort`].
#[allow(clippy::too_many_arguments)]
pub fn compute_weekly_hours(
    shifts: &dyn ShiftStore,
    punches: &dyn PunchStore,
    weekly: &dyn WeeklyHoursStore,
    employee_id: i64,
    organization_id: i64,
    week_start: NaiveDate,
    week_end: NaiveDate,
    policy: ParsePolicy,
) -> PayrollResult<WeeklyHours> {
    if week_end < week_start {
        return Err(PayrollError::InvalidPeriod {
            message: format!("week end {} precedes start {}", week_end, week_start),
        });
    }

    let week_shifts = shifts.find_for_employee(employee_id, organization_id, week_start, week_end);
    let scheduled_hours = sum_durations(
        week_shifts
            .iter()
            .map(|s| (s.shift_start.as_str(), s.shift_end.as_str())),
        policy,
    )?;

    let worked_hours: Decimal = punches
        .find_for_employee(employee_id, organization_id, week_start, week_end)
        .iter()
        .filter_map(|p| p.worked_hours())
        .sum();

    let overtime_hours = (worked_hours - WEEKLY_OVERTIME_THRESHOLD).max(Decimal::ZERO);

    let record = WeeklyHours {
        employee_id,
        organization_id,
        week_start,
        week_end,
        scheduled_hours,
        worked_hours,
        overtime_hours,
    };

    debug!(
        employee_id,
        organization_id,
        %week_start,
        %week_end,
        scheduled = %scheduled_hours,
        worked = %worked_hours,
        overtime = %overtime_hours,
        "computed weekly hours"
    );

    weekly.upsert(record.clone());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeePunch, Shift};
    use crate::store::{MemoryPunchStore, MemoryShiftStore, MemoryWeeklyHoursStore};
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn shift(id: i64, d: NaiveDate, start: &str, end: &str) -> Shift {
        Shift {
            id,
            employee_id: 7,
            organization_id: 1,
            worksite_id: 3,
            date: d,
            shift_start: start.to_string(),
            shift_end: end.to_string(),
            remarks: None,
            is_call_in: false,
            call_in_reason: None,
        }
    }

    fn closed_punch(d: NaiveDate, punch_in: NaiveTime, punch_out: NaiveTime) -> EmployeePunch {
        EmployeePunch {
            employee_id: 7,
            organization_id: 1,
            date: d,
            punch_in,
            punch_out: Some(punch_out),
            overtime_hours: Decimal::ZERO,
            shift_id: None,
        }
    }

    struct Fixture {
        shifts: MemoryShiftStore,
        punches: MemoryPunchStore,
        weekly: MemoryWeeklyHoursStore,
    }

    fn fixture() -> Fixture {
        Fixture {
            shifts: MemoryShiftStore::new(),
            punches: MemoryPunchStore::new(),
            weekly: MemoryWeeklyHoursStore::new(),
        }
    }

    fn compute(f: &Fixture) -> PayrollResult<WeeklyHours> {
        compute_weekly_hours(
            &f.shifts,
            &f.punches,
            &f.weekly,
            7,
            1,
            date(2024, 1, 1),
            date(2024, 1, 7),
            ParsePolicy::Abort,
        )
    }

    // ==========================================================================
    // WH-001: empty window yields all-zero aggregate
    // ==========================================================================
    #[test]
    fn test_wh_001_empty_window_is_zero() {
        let f = fixture();
        let result = compute(&f).unwrap();

        assert_eq!(result.scheduled_hours, Decimal::ZERO);
        assert_eq!(result.worked_hours, Decimal::ZERO);
        assert_eq!(result.overtime_hours, Decimal::ZERO);
        assert_eq!(f.weekly.len(), 1);
    }

    // ==========================================================================
    // WH-002: scheduled and worked summed over the window
    // ==========================================================================
    #[test]
    fn test_wh_002_sums_shifts_and_punches() {
        let f = fixture();
        for day in 1..=5 {
            let d = date(2024, 1, day);
            f.shifts.insert(shift(day as i64, d, "09:00", "17:00"));
            f.punches.insert_raw(closed_punch(d, time(9, 0), time(17, 0)));
        }

        let result = compute(&f).unwrap();
        assert_eq!(result.scheduled_hours, dec("40"));
        assert_eq!(result.worked_hours, dec("40"));
        assert_eq!(result.overtime_hours, Decimal::ZERO);
    }

    // ==========================================================================
    // WH-003: weekly overtime above 40 hours
    // ==========================================================================
    #[test]
    fn test_wh_003_overtime_above_forty() {
        let f = fixture();
        for day in 1..=5 {
            let d = date(2024, 1, day);
            // Nine-hour punches: 45 worked over the week.
            f.punches.insert_raw(closed_punch(d, time(8, 0), time(17, 0)));
        }

        let result = compute(&f).unwrap();
        assert_eq!(result.worked_hours, dec("45"));
        assert_eq!(result.overtime_hours, dec("5"));
    }

    #[test]
    fn test_open_punches_are_excluded_from_worked() {
        let f = fixture();
        f.punches
            .insert_raw(closed_punch(date(2024, 1, 2), time(9, 0), time(17, 0)));
        f.punches.insert_raw(EmployeePunch {
            employee_id: 7,
            organization_id: 1,
            date: date(2024, 1, 3),
            punch_in: time(9, 0),
            punch_out: None,
            overtime_hours: Decimal::ZERO,
            shift_id: None,
        });

        let result = compute(&f).unwrap();
        assert_eq!(result.worked_hours, dec("8"));
    }

    #[test]
    fn test_overnight_shift_counts_forward() {
        let f = fixture();
        f.shifts
            .insert(shift(1, date(2024, 1, 2), "22:00", "06:00"));

        let result = compute(&f).unwrap();
        assert_eq!(result.scheduled_hours, dec("8"));
    }

    #[test]
    fn test_shifts_outside_window_are_ignored() {
        let f = fixture();
        f.shifts
            .insert(shift(1, date(2024, 1, 8), "09:00", "17:00"));

        let result = compute(&f).unwrap();
        assert_eq!(result.scheduled_hours, Decimal::ZERO);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let f = fixture();
        f.shifts.insert(shift(1, date(2024, 1, 2), "09:00", "17:00"));

        let first = compute(&f).unwrap();
        let second = compute(&f).unwrap();

        assert_eq!(first, second);
        // One stored row, not two.
        assert_eq!(f.weekly.len(), 1);
    }

    #[test]
    fn test_recompute_reflects_new_punches() {
        let f = fixture();
        compute(&f).unwrap();

        f.punches
            .insert_raw(closed_punch(date(2024, 1, 2), time(9, 0), time(17, 0)));
        let updated = compute(&f).unwrap();

        assert_eq!(updated.worked_hours, dec("8"));
        assert_eq!(f.weekly.len(), 1);
        let stored = f
            .weekly
            .find_overlapping_for_employee(7, date(2024, 1, 1), date(2024, 1, 7));
        assert_eq!(stored, vec![updated]);
    }

    #[test]
    fn test_inverted_window_rejected_before_store_access() {
        let f = fixture();
        let result = compute_weekly_hours(
            &f.shifts,
            &f.punches,
            &f.weekly,
            7,
            1,
            date(2024, 1, 7),
            date(2024, 1, 1),
            ParsePolicy::Abort,
        );

        assert!(matches!(result, Err(PayrollError::InvalidPeriod { .. })));
        assert!(f.weekly.is_empty());
    }

    #[test]
    fn test_malformed_shift_time_abort_policy() {
        let f = fixture();
        f.shifts.insert(shift(1, date(2024, 1, 2), "9am", "17:00"));

        let result = compute(&f);
        assert!(matches!(result, Err(PayrollError::MalformedTime { .. })));
        // Nothing persisted on failure.
        assert!(f.weekly.is_empty());
    }

    #[test]
    fn test_malformed_shift_time_skip_policy() {
        let f = fixture();
        f.shifts.insert(shift(1, date(2024, 1, 2), "9am", "17:00"));
        f.shifts.insert(shift(2, date(2024, 1, 3), "09:00", "17:00"));

        let result = compute_weekly_hours(
            &f.shifts,
            &f.punches,
            &f.weekly,
            7,
            1,
            date(2024, 1, 1),
            date(2024, 1, 7),
            ParsePolicy::Skip,
        )
        .unwrap();

        assert_eq!(result.scheduled_hours, dec("8"));
    }
}
