//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payslip;
mod punch;
mod shift;
mod weekly_hours;

pub use employee::{EmployeePayProfile, PayType};
pub use payslip::Payslip;
pub use punch::EmployeePunch;
pub use shift::Shift;
pub use weekly_hours::WeeklyHours;
