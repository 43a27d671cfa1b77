//! Employee punch model.
//!
//! One clock-in/out record per employee per calendar date. A punch with no
//! punch-out time is "open": the employee is still clocked in. Absence of a
//! punch-out is an explicit `None`, never a sentinel time-of-day.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::duration_between;

/// One clock-in/out session for an employee on a calendar date.
///
/// Created on punch-in with `punch_out` set to `None`; mutated in place on
/// punch-out when the punch-out time and the day's overtime are recorded.
/// At most one open punch may exist per (employee, date); the punch store
/// enforces that invariant atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePunch {
    /// The employee who punched.
    pub employee_id: i64,
    /// The organization the employee punched in for.
    pub organization_id: i64,
    /// The calendar date of the session.
    pub date: NaiveDate,
    /// The time the employee clocked in.
    pub punch_in: NaiveTime,
    /// The time the employee clocked out, or `None` while still clocked in.
    pub punch_out: Option<NaiveTime>,
    /// Overtime hours for this single day, set on punch-out.
    pub overtime_hours: Decimal,
    /// The shift this punch fulfils, if linked by the scheduler.
    #[serde(default)]
    pub shift_id: Option<i64>,
}

impl EmployeePunch {
    /// Returns true while the session has no punch-out yet.
    pub fn is_open(&self) -> bool {
        self.punch_out.is_none()
    }

    /// Hours worked in this session, or `None` while the session is open.
    ///
    /// A punch-out at or before the punch-in time is treated as crossing
    /// midnight, matching the shift duration policy.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::EmployeePunch;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let punch = EmployeePunch {
    ///     employee_id: 7,
    ///     organization_id: 1,
    ///     date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
    ///     punch_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     punch_out: Some(NaiveTime::from_hms_opt(17, 30, 0).unwrap()),
    ///     overtime_hours: Decimal::ZERO,
    ///     shift_id: None,
    /// };
    /// assert_eq!(punch.worked_hours(), Some(Decimal::new(85, 1))); // 8.5
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        self.punch_out.map(|out| duration_between(self.punch_in, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn make_punch(punch_in: NaiveTime, punch_out: Option<NaiveTime>) -> EmployeePunch {
        EmployeePunch {
            employee_id: 7,
            organization_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            punch_in,
            punch_out,
            overtime_hours: Decimal::ZERO,
            shift_id: None,
        }
    }

    #[test]
    fn test_open_punch_has_no_worked_hours() {
        let punch = make_punch(time(9, 0), None);
        assert!(punch.is_open());
        assert_eq!(punch.worked_hours(), None);
    }

    #[test]
    fn test_closed_punch_worked_hours() {
        let punch = make_punch(time(9, 0), Some(time(17, 0)));
        assert!(!punch.is_open());
        assert_eq!(punch.worked_hours(), Some(Decimal::new(8, 0)));
    }

    #[test]
    fn test_overnight_punch_worked_hours() {
        let punch = make_punch(time(23, 0), Some(time(7, 0)));
        assert_eq!(punch.worked_hours(), Some(Decimal::new(8, 0)));
    }

    #[test]
    fn test_punch_serialization_round_trip() {
        let punch = make_punch(time(9, 0), Some(time(17, 30)));
        let json = serde_json::to_string(&punch).unwrap();
        let deserialized: EmployeePunch = serde_json::from_str(&json).unwrap();
        assert_eq!(punch, deserialized);
    }

    #[test]
    fn test_open_punch_serializes_null_punch_out() {
        let punch = make_punch(time(9, 0), None);
        let json = serde_json::to_string(&punch).unwrap();
        assert!(json.contains("\"punch_out\":null"));
    }
}
