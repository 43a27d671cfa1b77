//! Employee pay profile model.
//!
//! The engine does not own employee records; it consumes the payroll-relevant
//! slice of them (rate and pay type) supplied by the surrounding application.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an employee's configured pay rate is denominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    /// Rate is dollars per worked hour.
    Hourly,
    /// Rate is dollars per calendar month.
    Monthly,
}

/// The payroll-relevant slice of an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayProfile {
    /// Unique identifier for the employee.
    pub employee_id: i64,
    /// The organization the employee belongs to.
    pub organization_id: i64,
    /// Display name used on payslips and summaries.
    pub full_name: String,
    /// How `pay_rate` is denominated.
    pub pay_type: PayType,
    /// The configured pay rate.
    pub pay_rate: Decimal,
    /// Whether the employee is currently active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
