//! Biweekly payslip calculation.
//!
//! Composes the stored weekly hours aggregates across a pay period, groups
//! them by employee, derives gross pay with the overtime premium, and runs
//! the tax engine to produce one payslip per employee.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxYearConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeePayProfile, PayType, Payslip};
use crate::store::{EmployeeStore, WeeklyHoursStore};

use super::tax::withholding;

/// Premium multiplier applied to overtime hours (time and a half).
pub const OVERTIME_PAY_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Months per year, for converting monthly salaries to period pay.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Named policy switches for payslip derivation.
///
/// The reference system computes every employee as hourly regardless of
/// their configured pay type. That behavior is preserved as the default,
/// but as a visible decision rather than a hidden one: turn
/// `treat_all_as_hourly` off to pay salaried staff their salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayslipPolicy {
    /// Compute gross as hours x rate even for monthly-salaried employees.
    pub treat_all_as_hourly: bool,
}

impl Default for PayslipPolicy {
    fn default() -> Self {
        Self {
            treat_all_as_hourly: true,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct HourTotals {
    scheduled: Decimal,
    worked: Decimal,
    overtime: Decimal,
}

/// Calculates biweekly payslips for every employee of an organization with
/// weekly hours overlapping the pay period.
///
/// Weekly rows are matched by overlap (`week_start <= period_end` and
/// `week_end >= period_start`) and summed per employee; an employee may
/// contribute one, two, or three rows depending on week alignment, and all
/// of them are summed, never averaged. Gross pay is regular hours at the
/// configured rate plus overtime hours at the 1.5x premium; withholding is
/// annualized at the configured pay-period count. Every monetary field of
/// the emitted payslips is rounded to 2 decimal places at assembly.
///
/// A period with no matching weekly rows yields an empty list, not an
/// error.
///
/// # Errors
///
/// - [`PayrollError::InvalidPeriod`] when `period_end` precedes
///   `period_start`, rejected before any aggregation work.
/// - [`PayrollError::UnknownProvince`] when `province` has no bracket table.
/// - [`PayrollError::EmployeeNotFound`] when a weekly row references an
///   employee with no pay profile.
pub fn calculate_biweekly_payslips(
    weekly: &dyn WeeklyHoursStore,
    employees: &dyn EmployeeStore,
    tax: &TaxYearConfig,
    organization_id: i64,
    period_start: NaiveDate,
    period_end: NaiveDate,
    province: &str,
    policy: PayslipPolicy,
) -> PayrollResult<Vec<Payslip>> {
    validate_period(period_start, period_end)?;
    // Surface a configuration gap before touching any data.
    tax.provincial_brackets(province)?;

    let rows = weekly.find_overlapping(organization_id, period_start, period_end);
    debug!(
        organization_id,
        %period_start,
        %period_end,
        rows = rows.len(),
        "matched weekly hours for payslip run"
    );

    let mut totals: BTreeMap<i64, HourTotals> = BTreeMap::new();
    for row in &rows {
        let entry = totals.entry(row.employee_id).or_default();
        entry.scheduled += row.scheduled_hours;
        entry.worked += row.worked_hours;
        entry.overtime += row.overtime_hours;
    }

    let mut payslips = Vec::with_capacity(totals.len());
    for (employee_id, hours) in totals {
        let profile = employees
            .get(employee_id)
            .ok_or(PayrollError::EmployeeNotFound { employee_id })?;
        payslips.push(assemble_payslip(
            &profile,
            organization_id,
            period_start,
            period_end,
            &hours,
            tax,
            province,
            policy,
        )?);
    }

    Ok(payslips)
}

/// Calculates the biweekly payslip for a single employee.
///
/// Same derivation as [`calculate_biweekly_payslips`] restricted to one
/// employee's overlapping weekly rows. Returns `None` when the employee has
/// no weekly hours in the period. Always recomputes; results are cheap pure
/// arithmetic, so no stored-payslip cache is consulted.
///
/// # Errors
///
/// As [`calculate_biweekly_payslips`], plus
/// [`PayrollError::EmployeeNotFound`] when the employee has no pay profile.
pub fn calculate_employee_payslip(
    weekly: &dyn WeeklyHoursStore,
    employees: &dyn EmployeeStore,
    tax: &TaxYearConfig,
    employee_id: i64,
    period_start: NaiveDate,
    period_end: NaiveDate,
    province: &str,
    policy: PayslipPolicy,
) -> PayrollResult<Option<Payslip>> {
    validate_period(period_start, period_end)?;
    tax.provincial_brackets(province)?;

    let profile = employees
        .get(employee_id)
        .ok_or(PayrollError::EmployeeNotFound { employee_id })?;

    let rows = weekly.find_overlapping_for_employee(employee_id, period_start, period_end);
    if rows.is_empty() {
        return Ok(None);
    }

    let mut hours = HourTotals::default();
    for row in &rows {
        hours.scheduled += row.scheduled_hours;
        hours.worked += row.worked_hours;
        hours.overtime += row.overtime_hours;
    }

    let organization_id = profile.organization_id;
    Ok(Some(assemble_payslip(
        &profile,
        organization_id,
        period_start,
        period_end,
        &hours,
        tax,
        province,
        policy,
    )?))
}

fn validate_period(period_start: NaiveDate, period_end: NaiveDate) -> PayrollResult<()> {
    if period_end < period_start {
        return Err(PayrollError::InvalidPeriod {
            message: format!("period end {} precedes start {}", period_end, period_start),
        });
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn assemble_payslip(
    profile: &EmployeePayProfile,
    organization_id: i64,
    period_start: NaiveDate,
    period_end: NaiveDate,
    hours: &HourTotals,
    tax: &TaxYearConfig,
    province: &str,
    policy: PayslipPolicy,
) -> PayrollResult<Payslip> {
    let hourly = policy.treat_all_as_hourly || profile.pay_type == PayType::Hourly;

    let (regular_pay, overtime_pay) = if hourly {
        let regular_hours = hours.worked - hours.overtime;
        (
            regular_hours * profile.pay_rate,
            hours.overtime * profile.pay_rate * OVERTIME_PAY_MULTIPLIER,
        )
    } else {
        // Monthly salary spread over the year's pay periods; no overtime
        // premium applies to salaried pay.
        (
            profile.pay_rate * MONTHS_PER_YEAR / tax.periods(),
            Decimal::ZERO,
        )
    };
    let gross_income = regular_pay + overtime_pay;

    let w = withholding(gross_income, tax, province)?;
    let net_pay = gross_income - w.total();

    Ok(Payslip {
        employee_id: profile.employee_id,
        employee_name: profile.full_name.clone(),
        organization_id,
        period_start,
        period_end,
        total_scheduled_hours: hours.scheduled.round_dp(2),
        total_worked_hours: hours.worked.round_dp(2),
        total_overtime_hours: hours.overtime.round_dp(2),
        regular_pay: regular_pay.round_dp(2),
        overtime_pay: overtime_pay.round_dp(2),
        gross_income: gross_income.round_dp(2),
        federal_tax: w.federal_tax.round_dp(2),
        provincial_tax: w.provincial_tax.round_dp(2),
        cpp_contributions: w.cpp_contributions.round_dp(2),
        ei_premiums: w.ei_premiums.round_dp(2),
        net_pay: net_pay.round_dp(2),
        pay_type: if hourly {
            PayType::Hourly
        } else {
            profile.pay_type
        },
        hourly_rate: profile.pay_rate.round_dp(2),
    })
}
