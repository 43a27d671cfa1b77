//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll derivation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::MalformedTime {
///     value: "9am".to_string(),
/// };
/// assert_eq!(error.to_string(), "Malformed time value '9am': expected HH:MM");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// A clock string could not be parsed as "HH:MM".
    #[error("Malformed time value '{value}': expected HH:MM")]
    MalformedTime {
        /// The string that failed to parse.
        value: String,
    },

    /// The employee already has an open punch session for the date.
    #[error("Employee {employee_id} is already punched in on {date}")]
    AlreadyPunchedIn {
        /// The employee attempting to punch in.
        employee_id: i64,
        /// The date of the existing open session.
        date: NaiveDate,
    },

    /// The employee has no open punch session for the date.
    #[error("Employee {employee_id} has no open punch on {date}")]
    NotPunchedIn {
        /// The employee attempting to punch out.
        employee_id: i64,
        /// The date with no open session.
        date: NaiveDate,
    },

    /// The requested tax jurisdiction has no registered bracket table.
    #[error("No tax brackets registered for province '{province}'")]
    UnknownProvince {
        /// The province code that was requested.
        province: String,
    },

    /// A date window was inverted or malformed.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// No pay profile exists for the employee.
    #[error("Employee {employee_id} not found")]
    EmployeeNotFound {
        /// The employee that was requested.
        employee_id: i64,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
