//! Shift model.
//!
//! A shift is a scheduled work interval produced by the scheduling side of
//! the system. The payroll engine only ever reads shifts; it never creates
//! or mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled work interval for one employee on one calendar date.
///
/// Start and end times are wall-clock "HH:MM" strings as recorded by the
/// scheduler. An end time at or before the start time means the shift runs
/// past midnight; [`crate::calculation::duration_hours`] applies that policy
/// when deriving hours.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Shift;
/// use chrono::NaiveDate;
///
/// let shift = Shift {
///     id: 1,
///     employee_id: 7,
///     organization_id: 1,
///     worksite_id: 3,
///     date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     shift_start: "09:00".to_string(),
///     shift_end: "17:00".to_string(),
///     remarks: None,
///     is_call_in: false,
///     call_in_reason: None,
/// };
/// assert_eq!(shift.shift_start, "09:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: i64,
    /// The employee the shift is assigned to.
    pub employee_id: i64,
    /// The organization the shift belongs to.
    pub organization_id: i64,
    /// The worksite where the shift takes place.
    pub worksite_id: i64,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Scheduled start time as "HH:MM".
    pub shift_start: String,
    /// Scheduled end time as "HH:MM".
    pub shift_end: String,
    /// Optional free-form remarks from the scheduler.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Whether the employee has called in for this shift.
    #[serde(default)]
    pub is_call_in: bool,
    /// The reason given when calling in, if any.
    #[serde(default)]
    pub call_in_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_shift() -> Shift {
        Shift {
            id: 1,
            employee_id: 7,
            organization_id: 1,
            worksite_id: 3,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            shift_start: "09:00".to_string(),
            shift_end: "17:00".to_string(),
            remarks: Some("front desk".to_string()),
            is_call_in: false,
            call_in_reason: None,
        }
    }

    #[test]
    fn test_shift_serialization_round_trip() {
        let shift = make_shift();
        let json = serde_json::to_string(&shift).unwrap();
        let deserialized: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, deserialized);
    }

    #[test]
    fn test_shift_deserialization_with_defaults() {
        let json = r#"{
            "id": 1,
            "employee_id": 7,
            "organization_id": 1,
            "worksite_id": 3,
            "date": "2024-01-02",
            "shift_start": "22:00",
            "shift_end": "06:00"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.shift_end, "06:00");
        assert!(!shift.is_call_in);
        assert!(shift.remarks.is_none());
        assert!(shift.call_in_reason.is_none());
    }
}
