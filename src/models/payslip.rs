//! Payslip model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayType;

/// One computed payslip for an employee over a pay period.
///
/// A payslip is a pure function of the employee's overlapping weekly hours,
/// their pay rate, and the tax configuration; it carries no hidden state.
/// All monetary fields and hour totals are rounded to 2 decimal places at
/// assembly, never during intermediate computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee the payslip is for.
    pub employee_id: i64,
    /// Display name of the employee.
    pub employee_name: String,
    /// The organization issuing the payslip.
    pub organization_id: i64,
    /// First date of the pay period (inclusive).
    pub period_start: NaiveDate,
    /// Last date of the pay period (inclusive).
    pub period_end: NaiveDate,
    /// Scheduled hours summed over all overlapping weeks.
    pub total_scheduled_hours: Decimal,
    /// Worked hours summed over all overlapping weeks.
    pub total_worked_hours: Decimal,
    /// Overtime hours summed over all overlapping weeks.
    pub total_overtime_hours: Decimal,
    /// Pay for regular (non-overtime) hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours at the premium multiplier.
    pub overtime_pay: Decimal,
    /// Regular pay plus overtime pay.
    pub gross_income: Decimal,
    /// Federal income tax withheld for the period.
    pub federal_tax: Decimal,
    /// Provincial income tax withheld for the period.
    pub provincial_tax: Decimal,
    /// Canada Pension Plan contribution for the period.
    pub cpp_contributions: Decimal,
    /// Employment Insurance premium for the period.
    pub ei_premiums: Decimal,
    /// Gross income less all withholdings.
    pub net_pay: Decimal,
    /// The pay type the calculation treated the employee as.
    pub pay_type: PayType,
    /// The hourly rate used for the calculation.
    pub hourly_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_payslip_serialization_round_trip() {
        let payslip = Payslip {
            employee_id: 7,
            employee_name: "Dana Osei".to_string(),
            organization_id: 1,
            period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            total_scheduled_hours: dec("40.00"),
            total_worked_hours: dec("45.00"),
            total_overtime_hours: dec("5.00"),
            regular_pay: dec("800.00"),
            overtime_pay: dec("150.00"),
            gross_income: dec("950.00"),
            federal_tax: dec("55.96"),
            provincial_tax: dec("18.84"),
            cpp_contributions: dec("56.52"),
            ei_premiums: dec("15.48"),
            net_pay: dec("803.19"),
            pay_type: PayType::Hourly,
            hourly_rate: dec("20.00"),
        };

        let json = serde_json::to_string(&payslip).unwrap();
        let deserialized: Payslip = serde_json::from_str(&json).unwrap();
        assert_eq!(payslip, deserialized);
    }
}
