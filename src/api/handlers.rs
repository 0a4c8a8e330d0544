//! HTTP request handlers for the HRMS API.
//!
//! This module contains the router and the handler functions for every
//! endpoint. Handlers validate input into typed commands, call one service
//! and wrap the result in the response envelope.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::HrmsError;
use crate::models::PayrollMonth;
use crate::service::{CheckIn, CheckOut};
use crate::store::EmployeeFilter;

use super::request::{
    AttendanceQuery, CheckInRequest, CheckOutRequest, EmployeeListQuery, GeneratePayrollRequest,
    parse_date,
};
use super::response::{
    ApiEnvelope, ApiErrorResponse, DateAttendanceResponse, EmployeeAttendanceResponse,
    EmployeeListResponse, EmployeePayslipsResponse, HealthResponse,
};
use super::state::AppState;

type ApiResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
///
/// Business routes are nested under `/api/v1`; `/health` sits at the root
/// and unknown paths get a 404 envelope.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/attendance/checkin", post(check_in_handler))
        .route("/attendance/checkout", post(check_out_handler))
        .route(
            "/attendance/employee/:employee_id",
            get(employee_attendance_handler),
        )
        .route("/attendance/date/:date", get(date_attendance_handler))
        .route("/payroll/generate", post(generate_payroll_handler))
        .route("/payroll/batches", get(list_batches_handler))
        .route("/payroll/batch/:batch_id", get(get_batch_handler))
        .route(
            "/payroll/employee/:employee_id",
            get(employee_payslips_handler),
        )
        .route("/employees", get(list_employees_handler))
        .route("/employees/:employee_id", get(get_employee_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api)
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unwraps a JSON body or turns the rejection into an error envelope.
fn parse_body<T: DeserializeOwned>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let body = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiEnvelope::error("VALIDATION_ERROR", body_text)
            } else {
                ApiEnvelope::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiEnvelope::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiEnvelope::error(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiEnvelope::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, body))
}

/// Logs a failed request and converts the error for the client.
fn reject(correlation_id: Uuid, operation: &'static str, err: HrmsError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request rejected"
    );
    err.into()
}

/// Handler for POST /api/v1/attendance/checkin.
async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check-in request");

    let request = parse_body(correlation_id, payload)?;
    let command =
        CheckIn::try_from(request).map_err(|e| reject(correlation_id, "check_in", e))?;

    let start_time = Instant::now();
    let record = state
        .ledger()
        .record_check_in(command)
        .await
        .map_err(|e| reject(correlation_id, "check_in", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id(),
        record_id = %record.record_id,
        duration_us = start_time.elapsed().as_micros(),
        "Check-in completed"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success(record).with_message("Check-in recorded successfully")),
    )
        .into_response())
}

/// Handler for POST /api/v1/attendance/checkout.
async fn check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckOutRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check-out request");

    let request = parse_body(correlation_id, payload)?;
    let command =
        CheckOut::try_from(request).map_err(|e| reject(correlation_id, "check_out", e))?;

    let start_time = Instant::now();
    let record = state
        .ledger()
        .record_check_out(command)
        .await
        .map_err(|e| reject(correlation_id, "check_out", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id(),
        working_hours = %record.working_hours,
        duration_us = start_time.elapsed().as_micros(),
        "Check-out completed"
    );
    Ok(Json(ApiEnvelope::success(record).with_message("Check-out recorded successfully"))
        .into_response())
}

/// Handler for GET /api/v1/attendance/employee/:employeeId.
async fn employee_attendance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<AttendanceQuery>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let period = query
        .period()
        .map_err(|e| reject(correlation_id, "employee_attendance", e))?;

    let records = state
        .ledger()
        .query_by_employee(&employee_id, period.as_ref())
        .await
        .map_err(|e| reject(correlation_id, "employee_attendance", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        count = records.len(),
        "Employee attendance queried"
    );
    Ok(Json(ApiEnvelope::success(EmployeeAttendanceResponse {
        employee_id,
        total_records: records.len(),
        records,
    }))
    .into_response())
}

/// Handler for GET /api/v1/attendance/date/:date.
async fn date_attendance_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let day = parse_date("date", &date).map_err(|e| reject(correlation_id, "date_attendance", e))?;

    let records = state
        .ledger()
        .query_by_date(day)
        .await
        .map_err(|e| reject(correlation_id, "date_attendance", e))?;

    info!(
        correlation_id = %correlation_id,
        date = %day,
        count = records.len(),
        "Daily attendance queried"
    );
    Ok(Json(ApiEnvelope::success(DateAttendanceResponse {
        date: day.to_string(),
        total_present: records.len(),
        records,
    }))
    .into_response())
}

/// Handler for POST /api/v1/payroll/generate.
async fn generate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let request = parse_body(correlation_id, payload)?;
    let period = PayrollMonth::try_from(request)
        .map_err(|e| reject(correlation_id, "generate_payroll", e))?;

    let start_time = Instant::now();
    let batch = state
        .generator()
        .generate(period)
        .await
        .map_err(|e| reject(correlation_id, "generate_payroll", e))?;

    info!(
        correlation_id = %correlation_id,
        batch_id = %batch.batch_id,
        total_employees = batch.total_employees,
        total_amount = %batch.total_amount,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll generation completed"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success(batch).with_message("Payroll generated successfully")),
    )
        .into_response())
}

/// Handler for GET /api/v1/payroll/batch/:batchId.
async fn get_batch_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let batch = state
        .payslips()
        .get_batch(&batch_id)
        .await
        .map_err(|e| reject(correlation_id, "get_batch", e))?;
    Ok(Json(ApiEnvelope::success(batch)).into_response())
}

/// Handler for GET /api/v1/payroll/batches.
async fn list_batches_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let batches = state
        .payslips()
        .list_batches()
        .await
        .map_err(|e| reject(correlation_id, "list_batches", e))?;
    Ok(Json(ApiEnvelope::success(batches)).into_response())
}

/// Handler for GET /api/v1/payroll/employee/:employeeId.
async fn employee_payslips_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let payslips = state
        .payslips()
        .get_employee_payslips(&employee_id)
        .await
        .map_err(|e| reject(correlation_id, "employee_payslips", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        count = payslips.len(),
        "Payslips queried"
    );
    Ok(Json(ApiEnvelope::success(EmployeePayslipsResponse {
        employee_id,
        payslips,
    }))
    .into_response())
}

/// Handler for GET /api/v1/employees.
async fn list_employees_handler(
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let filter =
        EmployeeFilter::try_from(query).map_err(|e| reject(correlation_id, "list_employees", e))?;
    let employees = state
        .employees()
        .list(&filter)
        .await
        .map_err(|e| reject(correlation_id, "list_employees", e))?;

    Ok(Json(ApiEnvelope::success(EmployeeListResponse {
        total: employees.len(),
        employees,
    }))
    .into_response())
}

/// Handler for GET /api/v1/employees/:employeeId.
async fn get_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .employees()
        .get(&employee_id)
        .await
        .map_err(|e| reject(correlation_id, "get_employee", e))?;
    Ok(Json(ApiEnvelope::success(employee)).into_response())
}

/// Handler for GET /health.
async fn health_handler() -> Json<ApiEnvelope<HealthResponse>> {
    Json(ApiEnvelope::success(HealthResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

async fn not_found_handler() -> ApiErrorResponse {
    ApiErrorResponse::endpoint_not_found()
}
