//! Tax withholding engine.
//!
//! Progressive bracket tables are defined on annual income, so per-period
//! withholding annualizes the income by the configured number of pay periods,
//! walks the brackets marginally, and de-annualizes the result. CPP and EI
//! are flat-rate deductions with per-period earnings ceilings, not marginal.

use rust_decimal::Decimal;

use crate::config::{BracketTable, CppConfig, EiConfig, TaxYearConfig};
use crate::error::PayrollResult;

/// Per-period withholding components for one pay period's income.
#[derive(Debug, Clone, PartialEq)]
pub struct Withholding {
    /// Federal income tax for the period, after the basic personal credit.
    pub federal_tax: Decimal,
    /// Provincial income tax for the period, after the basic personal credit.
    pub provincial_tax: Decimal,
    /// CPP contribution for the period.
    pub cpp_contributions: Decimal,
    /// EI premium for the period.
    pub ei_premiums: Decimal,
}

impl Withholding {
    /// Sum of all withholding components.
    pub fn total(&self) -> Decimal {
        self.federal_tax + self.provincial_tax + self.cpp_contributions + self.ei_premiums
    }
}

/// Annual tax on an annual income under a progressive bracket table.
///
/// Walks brackets in ascending order, taxing only the income that falls
/// within each bracket's range at that bracket's rate. Stops as soon as the
/// income is exhausted. This is strict marginal taxation, never
/// flat-rate-on-total.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::marginal_tax;
/// use payroll_engine::config::{BracketTable, TaxBracket};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable {
///     brackets: vec![
///         TaxBracket { up_to: Some(Decimal::new(50_000, 0)), rate: Decimal::new(10, 2) },
///         TaxBracket { up_to: None, rate: Decimal::new(20, 2) },
///     ],
/// };
/// // 50000 * 0.10 + 10000 * 0.20 = 7000
/// assert_eq!(
///     marginal_tax(Decimal::new(60_000, 0), &table),
///     Decimal::new(7_000, 0)
/// );
/// ```
pub fn marginal_tax(annual_income: Decimal, table: &BracketTable) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut remaining = annual_income;
    let mut prev_bound = Decimal::ZERO;

    for bracket in &table.brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let bracket_span = match bracket.up_to {
            Some(bound) => bound - prev_bound,
            None => remaining,
        };
        let taxed = remaining.min(bracket_span);
        tax += taxed * bracket.rate;
        remaining -= taxed;
        if let Some(bound) = bracket.up_to {
            prev_bound = bound;
        }
    }

    tax
}

/// CPP contribution for one pay period's income.
///
/// Flat rate on the income capped at the per-period pensionable ceiling,
/// `(max_earnings - exemption) / periods`, floored at zero.
pub fn cpp_contribution(period_income: Decimal, cpp: &CppConfig, periods: Decimal) -> Decimal {
    let ceiling = (cpp.max_earnings - cpp.exemption) / periods;
    (period_income.min(ceiling) * cpp.rate).max(Decimal::ZERO)
}

/// EI premium for one pay period's income.
///
/// Flat rate on the income capped at the per-period insurable ceiling,
/// `max_earnings / periods`.
pub fn ei_premium(period_income: Decimal, ei: &EiConfig, periods: Decimal) -> Decimal {
    period_income.min(ei.max_earnings / periods) * ei.rate
}

/// Full per-period withholding for one pay period's income.
///
/// Annualizes the income, computes federal and provincial marginal tax,
/// de-annualizes, applies the basic personal amount credit against each at
/// the respective lowest bracket rate (floored at zero), and adds the
/// capped CPP/EI deductions. Nothing is rounded here; rounding belongs to
/// payslip assembly.
///
/// # Errors
///
/// [`crate::error::PayrollError::UnknownProvince`] when `province` has no
/// registered bracket table.
pub fn withholding(
    period_income: Decimal,
    config: &TaxYearConfig,
    province: &str,
) -> PayrollResult<Withholding> {
    let provincial_table = config.provincial_brackets(province)?;
    let periods = config.periods();

    let annual_income = period_income * periods;
    let federal_period = marginal_tax(annual_income, &config.federal) / periods;
    let provincial_period = marginal_tax(annual_income, provincial_table) / periods;

    let credit_base = config.basic_personal_amount / periods;
    let federal_tax =
        (federal_period - credit_base * config.federal.lowest_rate()).max(Decimal::ZERO);
    let provincial_tax =
        (provincial_period - credit_base * provincial_table.lowest_rate()).max(Decimal::ZERO);

    Ok(Withholding {
        federal_tax,
        provincial_tax,
        cpp_contributions: cpp_contribution(period_income, &config.cpp, periods),
        ei_premiums: ei_premium(period_income, &config.ei, periods),
    })
}
