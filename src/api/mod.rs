//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for weekly hours aggregation,
//! biweekly payslip calculation, punch session tracking, and the dashboard
//! summaries.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    HourListQuery, MonthlySummaryQuery, PayslipsRequest, PunchInRequest, PunchOutRequest,
    WeeklyHoursRequest,
};
pub use response::{ApiError, PunchInResponse, PunchOutResponse};
pub use state::AppState;
