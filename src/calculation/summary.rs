//! Read-only dashboard rollups.
//!
//! These aggregators re-query the same shift, punch, and weekly-hours data
//! the payroll path uses and fold it into reporting shapes. Nothing here
//! writes. Parse policy differs by call site and is deliberate: the
//! organization hour list skips malformed shift times, the monthly summary
//! aborts on them.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::store::{EmployeeStore, PunchStore, ShiftStore, WeeklyHoursStore};

use super::clock::{sum_durations, ParsePolicy};
use super::weekly_hours::WEEKLY_OVERTIME_THRESHOLD;

/// Number of top performers reported by the monthly summary.
const TOP_PERFORMER_LIMIT: usize = 5;

/// One employee's scheduled/worked/overtime totals over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeHourSummary {
    /// Employee the row belongs to.
    pub employee_id: i64,
    /// Display name from the pay profile.
    pub employee_name: String,
    /// Hours from scheduled shifts in the window.
    pub scheduled_hours: Decimal,
    /// Hours from closed punch sessions in the window.
    pub worked_hours: Decimal,
    /// Worked hours beyond the weekly threshold.
    pub overtime_hours: Decimal,
}

/// Scheduled hours of one calendar-aligned week bucket within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    /// 1-based week index within the month.
    pub week: u32,
    /// Scheduled hours falling in the bucket.
    pub hours: Decimal,
}

/// Shift-count ranking entry in the monthly summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePerformance {
    /// Employee being ranked.
    pub employee_id: i64,
    /// Display name from the pay profile.
    pub full_name: String,
    /// Number of shifts scheduled in the month.
    pub total_shifts: usize,
    /// Scheduled hours across those shifts.
    pub total_hours: Decimal,
    /// Daily overtime accumulated from the month's punches.
    pub total_overtime: Decimal,
}

/// Organization-wide rollup for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Pay profiles registered to the organization.
    pub total_employees: usize,
    /// Profiles marked inactive.
    pub total_inactive_employees: usize,
    /// Scheduled hours across the month's shifts.
    pub total_hours: Decimal,
    /// Daily overtime accumulated from the month's punches.
    pub total_overtime: Decimal,
    /// Shifts in the month with no punch session linked to them.
    pub total_no_shows: usize,
    /// Scheduled hours divided by employee count, zero when no employees.
    pub average_hours_per_employee: Decimal,
    /// Scheduled hours per week bucket of the month.
    pub weekly_hours: Vec<WeekBucket>,
    /// Up to five employees ranked by shift count.
    pub top_performers: Vec<EmployeePerformance>,
}

/// Rollup window for the employee dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupPeriod {
    /// Monday through Sunday of the reference date's week.
    Week,
    /// First of the month through the reference date.
    Month,
    /// January 1st through the reference date.
    Year,
}

/// Hour totals for one employee over a rollup window, rounded to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodHours {
    /// Hours from closed punch sessions.
    pub worked: Decimal,
    /// Hours from scheduled shifts.
    pub scheduled: Decimal,
    /// Overtime hours.
    pub overtime: Decimal,
}

/// Per-employee scheduled/worked/overtime totals over `[start, end]`.
///
/// Malformed shift times are skipped, matching the bulk-aggregation parse
/// policy. Worked hours come from closed punches only, and only for
/// employees that have at least one shift in the window; overtime is worked
/// hours beyond the 40h weekly threshold. Rows come back ordered by
/// employee id. Employees whose pay profile is missing are omitted.
pub fn organization_hour_list(
    shifts: &dyn ShiftStore,
    punches: &dyn PunchStore,
    employees: &dyn EmployeeStore,
    organization_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> PayrollResult<Vec<EmployeeHourSummary>> {
    if end < start {
        return Err(PayrollError::InvalidPeriod {
            message: format!("window end {} precedes start {}", end, start),
        });
    }

    let mut rows: Vec<EmployeeHourSummary> = Vec::new();
    for profile in employees.list_for_organization(organization_id) {
        let employee_shifts =
            shifts.find_for_employee(profile.employee_id, organization_id, start, end);
        if employee_shifts.is_empty() {
            continue;
        }

        let pairs: Vec<(&str, &str)> = employee_shifts
            .iter()
            .map(|s| (s.shift_start.as_str(), s.shift_end.as_str()))
            .collect();
        let scheduled = sum_durations(pairs, ParsePolicy::Skip)?;

        let worked: Decimal = punches
            .find_for_employee(profile.employee_id, organization_id, start, end)
            .iter()
            .filter_map(|p| p.worked_hours())
            .sum();
        let overtime = (worked - WEEKLY_OVERTIME_THRESHOLD).max(Decimal::ZERO);

        rows.push(EmployeeHourSummary {
            employee_id: profile.employee_id,
            employee_name: profile.full_name,
            scheduled_hours: scheduled,
            worked_hours: worked,
            overtime_hours: overtime,
        });
    }
    rows.sort_by_key(|r| r.employee_id);
    Ok(rows)
}

/// Organization-wide rollup for one calendar month given as `"YYYY-MM"`.
///
/// Scheduled hours abort on the first malformed shift time, matching the
/// report parse policy. Overtime is summed from the month's punch records.
/// A no-show is a shift no punch session links back to. Week buckets start
/// on the 1st and run in 7-day chunks, the last clamped to month end.
///
/// # Errors
///
/// - [`PayrollError::InvalidPeriod`] when `month` is not `"YYYY-MM"`.
/// - [`PayrollError::MalformedTime`] when a shift carries an unparseable
///   time string.
pub fn monthly_summary(
    shifts: &dyn ShiftStore,
    punches: &dyn PunchStore,
    employees: &dyn EmployeeStore,
    organization_id: i64,
    month: &str,
) -> PayrollResult<MonthlySummary> {
    let (first_day, last_day) = month_bounds(month)?;

    let profiles = employees.list_for_organization(organization_id);
    let total_employees = profiles.len();
    let total_inactive_employees = profiles.iter().filter(|p| !p.is_active).count();

    let month_shifts = shifts.find_for_organization(organization_id, first_day, last_day);
    let month_punches = punches.find_for_organization(organization_id, first_day, last_day);

    let pairs: Vec<(&str, &str)> = month_shifts
        .iter()
        .map(|s| (s.shift_start.as_str(), s.shift_end.as_str()))
        .collect();
    let total_hours = sum_durations(pairs, ParsePolicy::Abort)?;

    let total_overtime: Decimal = month_punches.iter().map(|p| p.overtime_hours).sum();

    let total_no_shows = month_shifts
        .iter()
        .filter(|s| !month_punches.iter().any(|p| p.shift_id == Some(s.id)))
        .count();

    // Week buckets: 7-day chunks anchored on the 1st. Times already
    // validated by the Abort pass above.
    let mut weekly_hours = Vec::new();
    let mut bucket_start = first_day;
    let mut week = 1;
    while bucket_start <= last_day {
        let bucket_end = bucket_start
            .checked_add_days(Days::new(6))
            .unwrap_or(last_day)
            .min(last_day);
        let bucket_pairs: Vec<(&str, &str)> = month_shifts
            .iter()
            .filter(|s| s.date >= bucket_start && s.date <= bucket_end)
            .map(|s| (s.shift_start.as_str(), s.shift_end.as_str()))
            .collect();
        weekly_hours.push(WeekBucket {
            week,
            hours: sum_durations(bucket_pairs, ParsePolicy::Skip)?,
        });
        bucket_start = match bucket_start.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
        week += 1;
    }

    let mut performers: Vec<EmployeePerformance> = Vec::new();
    for profile in &profiles {
        let own_shifts: Vec<_> = month_shifts
            .iter()
            .filter(|s| s.employee_id == profile.employee_id)
            .collect();
        if own_shifts.is_empty() {
            continue;
        }
        let own_pairs: Vec<(&str, &str)> = own_shifts
            .iter()
            .map(|s| (s.shift_start.as_str(), s.shift_end.as_str()))
            .collect();
        let own_overtime: Decimal = month_punches
            .iter()
            .filter(|p| p.employee_id == profile.employee_id)
            .map(|p| p.overtime_hours)
            .sum();
        performers.push(EmployeePerformance {
            employee_id: profile.employee_id,
            full_name: profile.full_name.clone(),
            total_shifts: own_shifts.len(),
            total_hours: sum_durations(own_pairs, ParsePolicy::Skip)?,
            total_overtime: own_overtime,
        });
    }
    performers.sort_by(|a, b| {
        b.total_shifts
            .cmp(&a.total_shifts)
            .then(a.employee_id.cmp(&b.employee_id))
    });
    performers.truncate(TOP_PERFORMER_LIMIT);

    let average_hours_per_employee = if total_employees > 0 {
        (total_hours / Decimal::from(total_employees)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    Ok(MonthlySummary {
        total_employees,
        total_inactive_employees,
        total_hours,
        total_overtime,
        total_no_shows,
        average_hours_per_employee,
        weekly_hours,
        top_performers: performers,
    })
}

/// Sums one employee's persisted weekly-hours rows over a dashboard window.
///
/// Only rows lying entirely inside the window count, so a week straddling a
/// month boundary shows up in the week rollup but not the month rollup.
/// Totals are rounded to 2 decimal places.
pub fn employee_period_hours(
    weekly: &dyn WeeklyHoursStore,
    employee_id: i64,
    period: RollupPeriod,
    reference: NaiveDate,
) -> PeriodHours {
    let (start, end) = match period {
        RollupPeriod::Week => {
            let monday = reference
                - chrono::Duration::days(i64::from(reference.weekday().num_days_from_monday()));
            (monday, monday + chrono::Duration::days(6))
        }
        RollupPeriod::Month => (reference.with_day(1).unwrap_or(reference), reference),
        RollupPeriod::Year => (
            NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference),
            reference,
        ),
    };

    let rows = weekly.find_within_for_employee(employee_id, start, end);
    let mut totals = PeriodHours {
        worked: Decimal::ZERO,
        scheduled: Decimal::ZERO,
        overtime: Decimal::ZERO,
    };
    for row in &rows {
        totals.worked += row.worked_hours;
        totals.scheduled += row.scheduled_hours;
        totals.overtime += row.overtime_hours;
    }
    totals.worked = totals.worked.round_dp(2);
    totals.scheduled = totals.scheduled.round_dp(2);
    totals.overtime = totals.overtime.round_dp(2);
    totals
}

fn month_bounds(month: &str) -> PayrollResult<(NaiveDate, NaiveDate)> {
    let invalid = || PayrollError::InvalidPeriod {
        message: format!("invalid month '{}', expected YYYY-MM", month),
    };
    let (year_s, month_s) = month.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_s.parse().map_err(|_| invalid())?;
    let month_num: u32 = month_s.parse().map_err(|_| invalid())?;
    if month_s.len() != 2 {
        return Err(invalid());
    }
    let first = NaiveDate::from_ymd_opt(year, month_num, 1).ok_or_else(invalid)?;
    let last = if month_num < 12 {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    }
    .ok_or_else(invalid)?
    .pred_opt()
    .ok_or_else(invalid)?;
    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeePayProfile, PayType, Shift, WeeklyHours};
    use crate::store::{
        MemoryEmployeeStore, MemoryPunchStore, MemoryShiftStore, MemoryWeeklyHoursStore,
    };
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

    fn profile(employee_id: i64, name: &str, active: bool) -> EmployeePayProfile {
        EmployeePayProfile {
            employee_id,
            organization_id: 1,
            full_name: name.to_string(),
            pay_type: PayType::Hourly,
            pay_rate: dec("20"),
            is_active: active,
        }
    }

    fn shift(id: i64, employee_id: i64, day: NaiveDate, start: &str, end: &str) -> Shift {
        Shift {
            id,
            employee_id,
            organization_id: 1,
            worksite_id: 1,
            date: day,
            shift_start: start.to_string(),
            shift_end: end.to_string(),
            remarks: None,
            is_call_in: false,
            call_in_reason: None,
        }
    }

    fn closed_punch(
        punches: &MemoryPunchStore,
        employee_id: i64,
        day: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        shift_id: Option<i64>,
    ) {
        use crate::calculation::{duration_between, DAILY_OVERTIME_THRESHOLD};
        use crate::models::EmployeePunch;
        let worked = duration_between(start, end);
        punches.insert_raw(EmployeePunch {
            employee_id,
            organization_id: 1,
            date: day,
            punch_in: start,
            punch_out: Some(end),
            overtime_hours: (worked - DAILY_OVERTIME_THRESHOLD).max(Decimal::ZERO),
            shift_id,
        });
    }

    // ==========================================================================
    // SUM-001: hour list groups by employee and skips malformed shift times
    // ==========================================================================
    #[test]
    fn test_sum_001_hour_list_skips_malformed() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        employees.upsert(profile(7, "Avery", true));
        shifts.insert(shift(1, 7, date(2024, 1, 2), "09:00", "17:00"));
        shifts.insert(shift(2, 7, date(2024, 1, 3), "bogus", "17:00"));
        closed_punch(&punches, 7, date(2024, 1, 2), time(9, 0), time(17, 0), Some(1));

        let rows = organization_hour_list(
            &shifts,
            &punches,
            &employees,
            1,
            date(2024, 1, 1),
            date(2024, 1, 7),
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "Avery");
        assert_eq!(rows[0].scheduled_hours, dec("8"));
        assert_eq!(rows[0].worked_hours, dec("8"));
        assert_eq!(rows[0].overtime_hours, dec("0"));
    }

    #[test]
    fn test_hour_list_empty_window_yields_empty_list() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        employees.upsert(profile(7, "Avery", true));

        let rows = organization_hour_list(
            &shifts,
            &punches,
            &employees,
            1,
            date(2024, 1, 1),
            date(2024, 1, 7),
        )
        .unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_hour_list_overtime_above_weekly_threshold() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        employees.upsert(profile(7, "Avery", true));
        for d in 1..=5 {
            let id = d as i64;
            shifts.insert(shift(id, 7, date(2024, 1, d), "08:00", "17:00"));
            closed_punch(&punches, 7, date(2024, 1, d), time(8, 0), time(17, 0), Some(id));
        }

        let rows = organization_hour_list(
            &shifts,
            &punches,
            &employees,
            1,
            date(2024, 1, 1),
            date(2024, 1, 7),
        )
        .unwrap();

        assert_eq!(rows[0].worked_hours, dec("45"));
        assert_eq!(rows[0].overtime_hours, dec("5"));
    }

    #[test]
    fn test_hour_list_rows_ordered_by_employee() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        for (id, name) in [(9, "Noor"), (4, "Kai")] {
            employees.upsert(profile(id, name, true));
            shifts.insert(shift(id, id, date(2024, 1, 2), "09:00", "17:00"));
        }

        let rows = organization_hour_list(
            &shifts,
            &punches,
            &employees,
            1,
            date(2024, 1, 1),
            date(2024, 1, 7),
        )
        .unwrap();

        let ids: Vec<i64> = rows.iter().map(|r| r.employee_id).collect();
        assert_eq!(ids, vec![4, 9]);
    }

    // ==========================================================================
    // SUM-002: monthly summary aborts on malformed shift times
    // ==========================================================================
    #[test]
    fn test_sum_002_monthly_summary_aborts_on_malformed() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        employees.upsert(profile(7, "Avery", true));
        shifts.insert(shift(1, 7, date(2024, 1, 2), "9am", "17:00"));

        let result = monthly_summary(&shifts, &punches, &employees, 1, "2024-01");

        assert!(matches!(result, Err(PayrollError::MalformedTime { .. })));
    }

    #[test]
    fn test_monthly_summary_rejects_bad_month_string() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();

        for bad in ["2024", "2024-13", "2024-1", "Jan-2024", ""] {
            let result = monthly_summary(&shifts, &punches, &employees, 1, bad);
            assert!(
                matches!(result, Err(PayrollError::InvalidPeriod { .. })),
                "expected InvalidPeriod for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_monthly_summary_totals_and_no_shows() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        employees.upsert(profile(7, "Avery", true));
        employees.upsert(profile(8, "Kai", false));
        // Two shifts; only the first gets a punch, the second is a no-show.
        shifts.insert(shift(1, 7, date(2024, 1, 2), "09:00", "17:00"));
        shifts.insert(shift(2, 8, date(2024, 1, 3), "09:00", "18:00"));
        closed_punch(&punches, 7, date(2024, 1, 2), time(9, 0), time(18, 0), Some(1));

        let summary = monthly_summary(&shifts, &punches, &employees, 1, "2024-01").unwrap();

        assert_eq!(summary.total_employees, 2);
        assert_eq!(summary.total_inactive_employees, 1);
        assert_eq!(summary.total_hours, dec("17"));
        // 9h punch against the 8h daily threshold.
        assert_eq!(summary.total_overtime, dec("1"));
        assert_eq!(summary.total_no_shows, 1);
        assert_eq!(summary.average_hours_per_employee, dec("8.50"));
    }

    #[test]
    fn test_monthly_summary_week_buckets_cover_month() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        employees.upsert(profile(7, "Avery", true));
        shifts.insert(shift(1, 7, date(2024, 1, 2), "09:00", "17:00"));
        shifts.insert(shift(2, 7, date(2024, 1, 30), "09:00", "13:00"));

        let summary = monthly_summary(&shifts, &punches, &employees, 1, "2024-01").unwrap();

        // January spans five 7-day buckets: 1-7, 8-14, 15-21, 22-28, 29-31.
        assert_eq!(summary.weekly_hours.len(), 5);
        assert_eq!(summary.weekly_hours[0].hours, dec("8"));
        assert_eq!(summary.weekly_hours[1].hours, dec("0"));
        assert_eq!(summary.weekly_hours[4].hours, dec("4"));
    }

    #[test]
    fn test_monthly_summary_top_performers_ranked_and_capped() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();
        let mut shift_id = 0;
        for id in 1..=7i64 {
            employees.upsert(profile(id, &format!("Employee {}", id), true));
            // Employee N gets N shifts.
            for d in 1..=id {
                shift_id += 1;
                shifts.insert(shift(shift_id, id, date(2024, 1, d as u32), "09:00", "17:00"));
            }
        }

        let summary = monthly_summary(&shifts, &punches, &employees, 1, "2024-01").unwrap();

        assert_eq!(summary.top_performers.len(), 5);
        assert_eq!(summary.top_performers[0].employee_id, 7);
        assert_eq!(summary.top_performers[0].total_shifts, 7);
        assert_eq!(summary.top_performers[0].total_hours, dec("56"));
        assert_eq!(summary.top_performers[4].employee_id, 3);
    }

    #[test]
    fn test_monthly_summary_empty_organization() {
        let shifts = MemoryShiftStore::new();
        let punches = MemoryPunchStore::new();
        let employees = MemoryEmployeeStore::new();

        let summary = monthly_summary(&shifts, &punches, &employees, 1, "2024-01").unwrap();

        assert_eq!(summary.total_employees, 0);
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.average_hours_per_employee, Decimal::ZERO);
        assert!(summary.top_performers.is_empty());
    }

    // ==========================================================================
    // SUM-003: dashboard rollups only count weeks fully inside the window
    // ==========================================================================
    #[test]
    fn test_sum_003_period_rollups() {
        let weekly = MemoryWeeklyHoursStore::new();
        let rows = [
            // Fully inside June.
            (date(2024, 6, 3), date(2024, 6, 9), "40", "42", "2"),
            (date(2024, 6, 10), date(2024, 6, 16), "40", "38", "0"),
            // Straddles the May/June boundary; excluded from the month rollup.
            (date(2024, 5, 27), date(2024, 6, 2), "40", "40", "0"),
        ];
        for (start, end, scheduled, worked, overtime) in rows {
            weekly.upsert(WeeklyHours {
                employee_id: 7,
                organization_id: 1,
                week_start: start,
                week_end: end,
                scheduled_hours: dec(scheduled),
                worked_hours: dec(worked),
                overtime_hours: dec(overtime),
            });
        }

        let month = employee_period_hours(&weekly, 7, RollupPeriod::Month, date(2024, 6, 20));
        assert_eq!(month.worked, dec("80.00"));
        assert_eq!(month.scheduled, dec("80.00"));
        assert_eq!(month.overtime, dec("2.00"));

        let year = employee_period_hours(&weekly, 7, RollupPeriod::Year, date(2024, 6, 20));
        assert_eq!(year.worked, dec("120.00"));

        // Week of June 20 is June 17-23; none of the stored rows fall there.
        let week = employee_period_hours(&weekly, 7, RollupPeriod::Week, date(2024, 6, 20));
        assert_eq!(week.worked, dec("0.00"));
    }

    #[test]
    fn test_week_rollup_starts_on_monday() {
        let weekly = MemoryWeeklyHoursStore::new();
        weekly.upsert(WeeklyHours {
            employee_id: 7,
            organization_id: 1,
            week_start: date(2024, 6, 17),
            week_end: date(2024, 6, 23),
            scheduled_hours: dec("40"),
            worked_hours: dec("41.5"),
            overtime_hours: dec("1.5"),
        });

        // Thursday June 20 resolves to the Monday-anchored window June 17-23.
        let week = employee_period_hours(&weekly, 7, RollupPeriod::Week, date(2024, 6, 20));
        assert_eq!(week.worked, dec("41.50"));
        assert_eq!(week.overtime, dec("1.50"));
    }
}
