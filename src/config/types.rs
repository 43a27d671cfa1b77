//! Tax configuration types.
//!
//! Strongly-typed structures deserialized from the YAML tax-year files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{PayrollError, PayrollResult};

/// One segment of a progressive tax schedule.
///
/// `up_to` is the annual-income upper bound of the segment; the final
/// bracket of a table omits it, meaning unbounded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the bracket on annual income, `None` for the top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate applied to income within this bracket.
    pub rate: Decimal,
}

/// An ordered progressive tax schedule for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BracketTable {
    /// Brackets in ascending bound order; the last is unbounded.
    pub brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// The rate of the lowest bracket, used for the basic personal amount
    /// credit. Zero for an empty table.
    pub fn lowest_rate(&self) -> Decimal {
        self.brackets.first().map(|b| b.rate).unwrap_or(Decimal::ZERO)
    }

    /// Validates ordering: bounds strictly increasing, only the final
    /// bracket unbounded, at least one bracket present.
    pub(crate) fn validate(&self, context: &str) -> PayrollResult<()> {
        if self.brackets.is_empty() {
            return Err(PayrollError::ConfigParseError {
                path: context.to_string(),
                message: "bracket table is empty".to_string(),
            });
        }
        let mut prev: Option<Decimal> = None;
        for (i, bracket) in self.brackets.iter().enumerate() {
            let is_last = i == self.brackets.len() - 1;
            match bracket.up_to {
                None if !is_last => {
                    return Err(PayrollError::ConfigParseError {
                        path: context.to_string(),
                        message: format!("bracket {} is unbounded but not last", i),
                    });
                }
                Some(bound) => {
                    if let Some(p) = prev {
                        if bound <= p {
                            return Err(PayrollError::ConfigParseError {
                                path: context.to_string(),
                                message: format!(
                                    "bracket bounds must be strictly increasing, {} <= {}",
                                    bound, p
                                ),
                            });
                        }
                    }
                    prev = Some(bound);
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Canada Pension Plan contribution parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CppConfig {
    /// Flat contribution rate.
    pub rate: Decimal,
    /// Annual pensionable earnings ceiling.
    pub max_earnings: Decimal,
    /// Annual basic exemption subtracted from the ceiling.
    pub exemption: Decimal,
}

/// Employment Insurance premium parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EiConfig {
    /// Flat premium rate.
    pub rate: Decimal,
    /// Annual insurable earnings ceiling.
    pub max_earnings: Decimal,
}

/// The complete withholding configuration for one tax year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxYearConfig {
    /// The tax year these values apply to.
    pub year: i32,
    /// Pay periods per year used to annualize period income (26 = biweekly).
    pub pay_periods_per_year: u32,
    /// Basic personal amount credited against federal and provincial tax.
    pub basic_personal_amount: Decimal,
    /// Federal bracket table.
    pub federal: BracketTable,
    /// Provincial bracket tables keyed by province code (e.g. "ON").
    pub provincial: HashMap<String, BracketTable>,
    /// CPP parameters.
    pub cpp: CppConfig,
    /// EI parameters.
    pub ei: EiConfig,
}

impl TaxYearConfig {
    /// The provincial bracket table for a province code.
    ///
    /// # Errors
    ///
    /// [`PayrollError::UnknownProvince`] when the province has no registered
    /// table. This is a configuration gap, distinct from computation errors.
    pub fn provincial_brackets(&self, province: &str) -> PayrollResult<&BracketTable> {
        self.provincial
            .get(province)
            .ok_or_else(|| PayrollError::UnknownProvince {
                province: province.to_string(),
            })
    }

    /// Pay periods per year as a `Decimal` for annualization arithmetic.
    pub fn periods(&self) -> Decimal {
        Decimal::from(self.pay_periods_per_year)
    }

    pub(crate) fn validate(&self, path: &str) -> PayrollResult<()> {
        if self.pay_periods_per_year == 0 {
            return Err(PayrollError::ConfigParseError {
                path: path.to_string(),
                message: "pay_periods_per_year must be positive".to_string(),
            });
        }
        self.federal.validate(&format!("{path} (federal)"))?;
        for (province, table) in &self.provincial {
            table.validate(&format!("{path} ({province})"))?;
        }
        Ok(())
    }
}
