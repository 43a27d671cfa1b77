//! Payroll derivation engine for workforce scheduling.
//!
//! This crate turns raw shift schedules and punch-clock events into weekly
//! aggregated hours, and those into biweekly payslips with Canadian
//! federal/provincial tax-bracket withholding, CPP/EI deductions, and
//! overtime premiums.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
