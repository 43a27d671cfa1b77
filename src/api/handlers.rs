//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_biweekly_payslips, calculate_employee_payslip, compute_weekly_hours,
    monthly_summary, organization_hour_list, punch_in, punch_out, punch_status, ParsePolicy,
    PayslipPolicy,
};

use super::request::{
    HourListQuery, MonthlySummaryQuery, PayslipsRequest, PunchInRequest, PunchOutRequest,
    WeeklyHoursRequest,
};
use super::response::{ApiError, ApiErrorResponse, PunchInResponse, PunchOutResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/weekly-hours", post(weekly_hours_handler))
        .route("/payslips", post(payslips_handler))
        .route("/punch/in", post(punch_in_handler))
        .route("/punch/out", post(punch_out_handler))
        .route("/punch/status/:employee_id", get(punch_status_handler))
        .route("/summary/hour-list", get(hour_list_handler))
        .route("/summary/monthly", get(monthly_summary_handler))
        .with_state(state)
}

/// Unwraps a JSON body or produces the 400 response for a rejection.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
        }
    }
}

fn payroll_error_response(
    correlation_id: Uuid,
    error: crate::error::PayrollError,
) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    ApiErrorResponse::from(error).into_response()
}

/// Handler for the `POST /weekly-hours` endpoint.
///
/// Recomputes and upserts the weekly hours aggregate for one employee week.
/// Malformed shift times are skipped, matching the bulk aggregation policy.
async fn weekly_hours_handler(
    State(state): State<AppState>,
    payload: Result<Json<WeeklyHoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        week_start = %request.week_start,
        "Computing weekly hours"
    );

    match compute_weekly_hours(
        state.shifts(),
        state.punches(),
        state.weekly(),
        request.employee_id,
        request.organization_id,
        request.week_start,
        request.week_end,
        ParsePolicy::Skip,
    ) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => payroll_error_response(correlation_id, error),
    }
}

/// Handler for the `POST /payslips` endpoint.
///
/// Returns the biweekly payslips for an organization period, or a single
/// employee's payslip as a one-element list when `employee_id` is given.
async fn payslips_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        organization_id = request.organization_id,
        period_start = %request.period_start,
        period_end = %request.period_end,
        province = %request.province,
        "Calculating payslips"
    );

    let policy = PayslipPolicy {
        treat_all_as_hourly: request.treat_all_as_hourly,
    };
    let config = state.tax().latest();

    let result = match request.employee_id {
        Some(employee_id) => calculate_employee_payslip(
            state.weekly(),
            state.employees(),
            config,
            employee_id,
            request.period_start,
            request.period_end,
            &request.province,
            policy,
        )
        .map(|slip| slip.into_iter().collect()),
        None => calculate_biweekly_payslips(
            state.weekly(),
            state.employees(),
            config,
            request.organization_id,
            request.period_start,
            request.period_end,
            &request.province,
            policy,
        ),
    };

    match result {
        Ok(payslips) => {
            info!(
                correlation_id = %correlation_id,
                payslips = payslips.len(),
                "Payslip calculation completed"
            );
            (StatusCode::OK, Json(payslips)).into_response()
        }
        Err(error) => payroll_error_response(correlation_id, error),
    }
}

/// Handler for the `POST /punch/in` endpoint.
async fn punch_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<PunchInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let now = Local::now().naive_local();
    let date = request.date.unwrap_or_else(|| now.date());
    let time = request.time.unwrap_or_else(|| now.time());
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        %date,
        "Punch in"
    );

    match punch_in(
        state.punches(),
        request.employee_id,
        request.organization_id,
        date,
        time,
        request.shift_id,
    ) {
        Ok(punch) => (
            StatusCode::OK,
            Json(PunchInResponse {
                message: "Punched in successfully".to_string(),
                punch_in_time: punch.punch_in,
            }),
        )
            .into_response(),
        Err(error) => payroll_error_response(correlation_id, error),
    }
}

/// Handler for the `POST /punch/out` endpoint.
async fn punch_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<PunchOutRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let now = Local::now().naive_local();
    let date = request.date.unwrap_or_else(|| now.date());
    let time = request.time.unwrap_or_else(|| now.time());
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        %date,
        "Punch out"
    );

    match punch_out(state.punches(), request.employee_id, date, time) {
        Ok(receipt) => (
            StatusCode::OK,
            Json(PunchOutResponse {
                message: "Punched out successfully".to_string(),
                punch_out_time: receipt.punch_out,
                total_worked_hours: receipt.worked_hours,
                overtime_hours: receipt.overtime_hours,
            }),
        )
            .into_response(),
        Err(error) => payroll_error_response(correlation_id, error),
    }
}

/// Handler for the `GET /punch/status/:employee_id` endpoint.
async fn punch_status_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Response {
    let today = Local::now().naive_local().date();
    let status = punch_status(state.punches(), employee_id, today);
    (StatusCode::OK, Json(status)).into_response()
}

/// Handler for the `GET /summary/hour-list` endpoint.
async fn hour_list_handler(
    State(state): State<AppState>,
    Query(query): Query<HourListQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        organization_id = query.organization_id,
        week_start = %query.week_start,
        "Hour list summary"
    );

    match organization_hour_list(
        state.shifts(),
        state.punches(),
        state.employees(),
        query.organization_id,
        query.week_start,
        query.week_end,
    ) {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(error) => payroll_error_response(correlation_id, error),
    }
}

/// Handler for the `GET /summary/monthly` endpoint.
async fn monthly_summary_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthlySummaryQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        organization_id = query.organization_id,
        month = %query.month,
        "Monthly summary"
    );

    match monthly_summary(
        state.shifts(),
        state.punches(),
        state.employees(),
        query.organization_id,
        &query.month,
    ) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => payroll_error_response(correlation_id, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxTables;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let tax = TaxTables::load("./config/tax").expect("Failed to load tax config");
        AppState::in_memory(tax)
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payslips")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        // organization_id missing
        let body = r#"{
            "period_start": "2024-01-01",
            "period_end": "2024-01-14"
        }"#;

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payslips")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("missing field"),
            "Expected missing field message, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_missing_content_type_rejected() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/punch/in")
                    .body(Body::from(r#"{"employee_id": 7, "organization_id": 1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }
}
