//! Response envelope and error mapping for the HRMS API.
//!
//! Every response body, success or failure, has the shape
//! `{status, message?, code?, data?, errors?}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::error::{FieldError, HrmsError};
use crate::models::{AttendanceRecord, Employee, Payslip};

/// The JSON envelope wrapped around every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T = Value> {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Human-readable summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Payload of a successful response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field-level validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiEnvelope<T> {
    /// Wraps `data` in a success envelope.
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            code: None,
            data: Some(data),
            errors: None,
        }
    }

    /// Attaches a summary message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiEnvelope<Value> {
    /// Builds an error envelope.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            code: Some(code.into()),
            data: None,
            errors: None,
        }
    }

    /// Creates a malformed JSON error.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::error("MALFORMED_JSON", message)
    }
}

/// An error envelope with its HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub body: ApiEnvelope,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, body: ApiEnvelope) -> Self {
        Self { status, body }
    }

    /// The 404 returned for unknown routes.
    pub fn endpoint_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ApiEnvelope::error("NOT_FOUND", "Endpoint not found"),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<HrmsError> for ApiErrorResponse {
    fn from(err: HrmsError) -> Self {
        match err {
            HrmsError::Validation { errors } => {
                let mut body = ApiEnvelope::error("VALIDATION_ERROR", "Validation failed");
                body.errors = Some(errors);
                Self::new(StatusCode::BAD_REQUEST, body)
            }
            err @ HrmsError::NotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiEnvelope::error("NOT_FOUND", err.to_string()),
            ),
            HrmsError::Conflict { message } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiEnvelope::error("CONFLICT", message),
            ),
            err @ (HrmsError::Internal { .. }
            | HrmsError::ConfigNotFound { .. }
            | HrmsError::ConfigParseError { .. }) => {
                error!(error = %err, "Request failed with internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiEnvelope::error("INTERNAL_ERROR", "Internal server error"),
                )
            }
        }
    }
}

/// Payload of `GET /attendance/employee/:employeeId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttendanceResponse {
    /// The employee queried.
    pub employee_id: String,
    /// Number of records returned.
    pub total_records: usize,
    /// Records, newest date first.
    pub records: Vec<AttendanceRecord>,
}

/// Payload of `GET /attendance/date/:date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateAttendanceResponse {
    /// The day queried, `YYYY-MM-DD`.
    pub date: String,
    /// Number of records on that day.
    pub total_present: usize,
    /// Records, earliest check-in first.
    pub records: Vec<AttendanceRecord>,
}

/// Payload of `GET /payroll/employee/:employeeId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayslipsResponse {
    /// The employee queried.
    pub employee_id: String,
    /// Payslips, oldest period first.
    pub payslips: Vec<Payslip>,
}

/// Payload of `GET /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListResponse {
    /// Number of employees returned.
    pub total: usize,
    /// Employees, ordered by id.
    pub employees: Vec<Employee>,
}

/// Payload of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service name.
    pub service: String,
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}
