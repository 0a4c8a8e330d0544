//! HTTP API module for the HRMS payroll service.
//!
//! This module provides the REST endpoints for attendance, payroll
//! generation, payslips and the read-only employee directory.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceQuery, CheckInRequest, CheckOutRequest, EmployeeListQuery, GeneratePayrollRequest,
};
pub use response::{
    ApiEnvelope, ApiErrorResponse, DateAttendanceResponse, EmployeeAttendanceResponse,
    EmployeeListResponse, EmployeePayslipsResponse, HealthResponse,
};
pub use state::AppState;
