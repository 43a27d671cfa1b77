//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and the status-code
//! mapping for engine errors, plus the punch confirmation bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Confirmation body for `POST /punch/in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchInResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The recorded punch-in time.
    pub punch_in_time: NaiveTime,
}

/// Confirmation body for `POST /punch/out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchOutResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The recorded punch-out time.
    pub punch_out_time: NaiveTime,
    /// Length of the closed session in hours.
    pub total_worked_hours: Decimal,
    /// Hours beyond the daily overtime threshold.
    pub overtime_hours: Decimal,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        match error {
            PayrollError::MalformedTime { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MALFORMED_TIME",
                    format!("Malformed time value '{}'", value),
                    "Times must use the 24-hour HH:MM format",
                ),
            },
            PayrollError::AlreadyPunchedIn { employee_id, date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "ALREADY_PUNCHED_IN",
                    format!("Employee {} is already punched in on {}", employee_id, date),
                ),
            },
            PayrollError::NotPunchedIn { employee_id, date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "NOT_PUNCHED_IN",
                    format!("Employee {} has no open punch on {}", employee_id, date),
                ),
            },
            PayrollError::UnknownProvince { province } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNKNOWN_PROVINCE",
                    format!("No tax brackets registered for province '{}'", province),
                    "Provinces are configured in the tax year YAML files",
                ),
            },
            PayrollError::InvalidPeriod { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", message),
            },
            PayrollError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "EMPLOYEE_NOT_FOUND",
                    format!("Employee {} has no pay profile", employee_id),
                ),
            },
            PayrollError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            PayrollError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
