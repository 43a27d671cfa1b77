//! Punch session tracking.
//!
//! Punch-in opens a session for (employee, date); punch-out closes it and
//! derives the day's worked and overtime hours. The one-open-session
//! invariant itself lives in [`crate::store::PunchStore`]; this module holds
//! the day-level business rules layered on top.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PayrollResult;
use crate::models::EmployeePunch;
use crate::store::PunchStore;

/// Daily hours threshold beyond which a single session accrues overtime.
///
/// This is independent of the 40h weekly threshold in
/// [`super::weekly_hours`]; a 9h day earns 1h of daily overtime even in an
/// under-40 week.
pub const DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Confirmation returned by [`punch_out`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchOutReceipt {
    /// Employee whose session was closed.
    pub employee_id: i64,
    /// Date the session belongs to.
    pub date: NaiveDate,
    /// Recorded punch-in time.
    pub punch_in: NaiveTime,
    /// Recorded punch-out time.
    pub punch_out: NaiveTime,
    /// Session length in hours.
    pub worked_hours: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
}

/// Current punch state of an employee on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchStatus {
    /// Employee being reported on.
    pub employee_id: i64,
    /// Date being reported on.
    pub date: NaiveDate,
    /// Whether an open session exists right now.
    pub punched_in: bool,
    /// Punch-in time of the day's session, if any session exists.
    pub punch_in: Option<NaiveTime>,
    /// Punch-out time, once the session is closed.
    pub punch_out: Option<NaiveTime>,
    /// Session length in hours; `None` while the session is still open.
    pub total_worked_hours: Option<Decimal>,
}

/// Opens a punch session for the employee on `date`.
///
/// # Errors
///
/// [`crate::error::PayrollError::AlreadyPunchedIn`] when the employee
/// already has an open session for that date.
pub fn punch_in(
    punches: &dyn PunchStore,
    employee_id: i64,
    organization_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    shift_id: Option<i64>,
) -> PayrollResult<EmployeePunch> {
    let punch = EmployeePunch {
        employee_id,
        organization_id,
        date,
        punch_in: time,
        punch_out: None,
        overtime_hours: Decimal::ZERO,
        shift_id,
    };
    punches.insert_open_punch(punch.clone())?;
    debug!(employee_id, %date, %time, "opened punch session");
    Ok(punch)
}

/// Closes the employee's open session on `date`, deriving worked hours and
/// daily overtime against [`DAILY_OVERTIME_THRESHOLD`].
///
/// A punch-out time earlier than the punch-in time is read as crossing
/// midnight, same as the clock arithmetic everywhere else in the engine.
///
/// # Errors
///
/// [`crate::error::PayrollError::NotPunchedIn`] when no open session exists
/// for the employee on that date.
pub fn punch_out(
    punches: &dyn PunchStore,
    employee_id: i64,
    date: NaiveDate,
    time: NaiveTime,
) -> PayrollResult<PunchOutReceipt> {
    let closed = punches.close_open_punch(employee_id, date, time, DAILY_OVERTIME_THRESHOLD)?;
    // close_open_punch only returns closed sessions; the None arm is
    // unreachable but costs nothing to handle.
    let worked = closed.worked_hours().unwrap_or(Decimal::ZERO);
    debug!(
        employee_id,
        %date,
        %worked,
        overtime = %closed.overtime_hours,
        "closed punch session"
    );
    Ok(PunchOutReceipt {
        employee_id,
        date,
        punch_in: closed.punch_in,
        punch_out: time,
        worked_hours: worked,
        overtime_hours: closed.overtime_hours,
    })
}

/// Reports the employee's punch state on `date` without modifying anything.
pub fn punch_status(punches: &dyn PunchStore, employee_id: i64, date: NaiveDate) -> PunchStatus {
    match punches.find_on_date(employee_id, date) {
        Some(punch) => PunchStatus {
            employee_id,
            date,
            punched_in: punch.is_open(),
            punch_in: Some(punch.punch_in),
            punch_out: punch.punch_out,
            total_worked_hours: punch.worked_hours(),
        },
        None => PunchStatus {
            employee_id,
            date,
            punched_in: false,
            punch_in: None,
            punch_out: None,
            total_worked_hours: None,
        },
    }
}
