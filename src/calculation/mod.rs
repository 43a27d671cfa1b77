//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for turning shift and
//! punch data into pay, including "HH:MM" clock parsing and overnight-aware
//! duration arithmetic, weekly hours aggregation with the 40h weekly
//! overtime threshold, marginal tax bracket walking with CPP/EI deductions
//! and the basic personal amount credit, biweekly payslip assembly, punch
//! session tracking with the 8h daily overtime threshold, and the read-only
//! dashboard rollups.

mod clock;
mod payslip;
mod punch_session;
mod summary;
mod tax;
mod weekly_hours;

pub use clock::{ParsePolicy, duration_between, duration_hours, parse_clock, sum_durations};
pub use payslip::{
    OVERTIME_PAY_MULTIPLIER, PayslipPolicy, calculate_biweekly_payslips,
    calculate_employee_payslip,
};
pub use punch_session::{
    DAILY_OVERTIME_THRESHOLD, PunchOutReceipt, PunchStatus, punch_in, punch_out, punch_status,
};
pub use summary::{
    EmployeeHourSummary, EmployeePerformance, MonthlySummary, PeriodHours, RollupPeriod,
    WeekBucket, employee_period_hours, monthly_summary, organization_hour_list,
};
pub use tax::{Withholding, cpp_contribution, ei_premium, marginal_tax, withholding};
pub use weekly_hours::{WEEKLY_OVERTIME_THRESHOLD, compute_weekly_hours};
