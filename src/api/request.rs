//! Request types for the payroll engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Request body for the `POST /weekly-hours` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHoursRequest {
    /// The employee whose week is being aggregated.
    pub employee_id: i64,
    /// The employee's organization.
    pub organization_id: i64,
    /// First day of the week window (inclusive).
    pub week_start: NaiveDate,
    /// Last day of the week window (inclusive).
    pub week_end: NaiveDate,
}

/// Request body for the `POST /payslips` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipsRequest {
    /// The organization being paid.
    pub organization_id: i64,
    /// First day of the pay period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the pay period (inclusive).
    pub period_end: NaiveDate,
    /// Tax jurisdiction selecting a provincial bracket table.
    #[serde(default = "default_province")]
    pub province: String,
    /// When set, compute only this employee's payslip.
    #[serde(default)]
    pub employee_id: Option<i64>,
    /// Compute gross as hours x rate even for salaried employees.
    #[serde(default = "default_true")]
    pub treat_all_as_hourly: bool,
}

/// Request body for the `POST /punch/in` endpoint.
///
/// Date and time default to the server's local clock; explicit values are
/// accepted for backfills and testing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchInRequest {
    /// The employee punching in.
    pub employee_id: i64,
    /// The employee's organization.
    pub organization_id: i64,
    /// The shift the session belongs to, if any.
    #[serde(default)]
    pub shift_id: Option<i64>,
    /// Override for the punch date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Override for the punch-in time.
    #[serde(default)]
    pub time: Option<NaiveTime>,
}

/// Request body for the `POST /punch/out` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchOutRequest {
    /// The employee punching out.
    pub employee_id: i64,
    /// Override for the punch date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Override for the punch-out time.
    #[serde(default)]
    pub time: Option<NaiveTime>,
}

/// Query string for the `GET /summary/hour-list` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourListQuery {
    /// The organization being reported on.
    pub organization_id: i64,
    /// First day of the window (inclusive).
    pub week_start: NaiveDate,
    /// Last day of the window (inclusive).
    pub week_end: NaiveDate,
}

/// Query string for the `GET /summary/monthly` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummaryQuery {
    /// The organization being reported on.
    pub organization_id: i64,
    /// Calendar month as "YYYY-MM".
    pub month: String,
}

fn default_province() -> String {
    "ON".to_string()
}

fn default_true() -> bool {
    true
}
