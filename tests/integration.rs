//! End-to-end tests for the HRMS payroll service.
//!
//! This test suite drives the HTTP router and covers:
//! - Check-in and check-out, including duplicates and validation
//! - Attendance queries by employee and by date
//! - Payroll generation, totals, roster coverage and repeat generation
//! - Payslip and batch queries
//! - Read-only employee directory
//! - Health and unknown routes

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use hrms_payroll::api::{AppState, create_router};
use hrms_payroll::config::{ConfigLoader, DuplicateBatchPolicy, PayrollPolicy};
use hrms_payroll::models::{Employee, EmployeeStatus};
use hrms_payroll::store::{InMemoryAttendanceStore, InMemoryEmployeeDirectory, InMemoryPayrollStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/hrms").expect("Failed to load config");
    AppState::new(config).expect("Failed to build state")
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn router_with(employees: Vec<Employee>, policy: PayrollPolicy) -> Router {
    create_router(AppState::with_stores(
        Arc::new(InMemoryEmployeeDirectory::new(employees)),
        Arc::new(InMemoryAttendanceStore::new()),
        Arc::new(InMemoryPayrollStore::new()),
        policy,
    )
    .expect("Failed to build state"))
}

fn employee(id: &str, status: EmployeeStatus) -> Employee {
    Employee {
        employee_id: id.to_string(),
        first_name: "Test".to_string(),
        last_name: id.to_string(),
        department: "Engineering".to_string(),
        position: "Engineer".to_string(),
        salary: None,
        status,
    }
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal that may be serialized as a string or a number.
fn decimal_at(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        Value::Number(n) => decimal(&n.to_string()),
        other => panic!("Expected decimal, got {other}"),
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn check_in(router: &Router, employee_id: &str, date: &str, time: &str) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/api/v1/attendance/checkin",
        Some(json!({
            "employeeId": employee_id,
            "date": date,
            "checkInTime": time,
            "location": "Head Office"
        })),
    )
    .await
}

async fn check_out(router: &Router, employee_id: &str, date: &str, time: &str) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/api/v1/attendance/checkout",
        Some(json!({
            "employeeId": employee_id,
            "date": date,
            "checkOutTime": time
        })),
    )
    .await
}

async fn attend_days(router: &Router, employee_id: &str, year: i32, month: u32, days: u32) {
    for day in 1..=days {
        let date = format!("{:04}-{:02}-{:02}", year, month, day);
        let (status, _) = check_in(router, employee_id, &date, "09:00:00").await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

async fn generate(router: &Router, month: u32, year: i32) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/api/v1/payroll/generate",
        Some(json!({ "month": month, "year": year })),
    )
    .await
}

fn line_for<'a>(batch: &'a Value, employee_id: &str) -> &'a Value {
    batch["records"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["employeeId"] == employee_id)
        .unwrap_or_else(|| panic!("No line for {employee_id}"))
}

fn field_names(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_check_in_then_check_out_records_working_hours() {
    let router = create_router_for_test();

    let (status, body) = check_in(&router, "EMP-001", "2026-03-02", "09:00:00").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["employeeName"], "Alice Nguyen");
    assert_eq!(body["data"]["department"], "Engineering");
    assert_eq!(body["data"]["status"], "PRESENT");
    assert!(body["data"]["recordId"].as_str().unwrap().starts_with("ATT-"));

    let (status, body) = check_out(&router, "EMP-001", "2026-03-02", "17:30:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checkOutTime"], "17:30:00");
    assert_eq!(decimal_at(&body["data"]["workingHours"]), decimal("8.5"));
}

#[tokio::test]
async fn test_duplicate_check_in_is_rejected() {
    let router = create_router_for_test();

    let (status, _) = check_in(&router, "EMP-001", "2026-03-02", "09:00:00").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = check_in(&router, "EMP-001", "2026-03-02", "10:00:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (_, body) = send(&router, "GET", "/api/v1/attendance/employee/EMP-001", None).await;
    assert_eq!(body["data"]["totalRecords"], 1);
    assert_eq!(body["data"]["records"][0]["checkInTime"], "09:00:00");
}

#[tokio::test]
async fn test_concurrent_check_ins_create_one_record() {
    let router = create_router_for_test();

    let attempts = (0..8).map(|i| {
        let router = router.clone();
        tokio::spawn(async move {
            check_in(&router, "EMP-001", "2026-03-02", &format!("09:0{}:00", i))
                .await
                .0
        })
    });
    let mut created = 0;
    for attempt in attempts {
        if attempt.await.unwrap() == StatusCode::CREATED {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    let (_, body) = send(&router, "GET", "/api/v1/attendance/date/2026-03-02", None).await;
    assert_eq!(body["data"]["totalPresent"], 1);
}

#[tokio::test]
async fn test_check_in_missing_location_persists_nothing() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/api/v1/attendance/checkin",
        Some(json!({
            "employeeId": "EMP-001",
            "date": "2026-03-02",
            "checkInTime": "09:00:00"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(field_names(&body), vec!["location"]);

    let (_, body) = send(&router, "GET", "/api/v1/attendance/employee/EMP-001", None).await;
    assert_eq!(body["data"]["totalRecords"], 0);
}

#[tokio::test]
async fn test_check_in_unknown_employee_returns_404() {
    let router = create_router_for_test();
    let (status, body) = check_in(&router, "EMP-999", "2026-03-02", "09:00:00").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_check_out_without_check_in_returns_404() {
    let router = create_router_for_test();
    let (status, _) = check_out(&router, "EMP-001", "2026-03-02", "17:00:00").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_second_check_out_is_rejected() {
    let router = create_router_for_test();
    check_in(&router, "EMP-001", "2026-03-02", "09:00:00").await;
    check_out(&router, "EMP-001", "2026-03-02", "17:00:00").await;

    let (status, body) = check_out(&router, "EMP-001", "2026-03-02", "18:00:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (_, body) = send(&router, "GET", "/api/v1/attendance/date/2026-03-02", None).await;
    assert_eq!(decimal_at(&body["data"]["records"][0]["workingHours"]), decimal("8"));
}

#[tokio::test]
async fn test_employee_attendance_filtered_by_month_newest_first() {
    let router = create_router_for_test();
    for date in ["2026-02-27", "2026-03-02", "2026-03-05", "2026-04-01"] {
        check_in(&router, "EMP-001", date, "09:00:00").await;
    }

    let (status, body) = send(
        &router,
        "GET",
        "/api/v1/attendance/employee/EMP-001?month=3&year=2026",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employeeId"], "EMP-001");
    assert_eq!(body["data"]["totalRecords"], 2);
    assert_eq!(body["data"]["records"][0]["date"], "2026-03-05");
    assert_eq!(body["data"]["records"][1]["date"], "2026-03-02");
}

#[tokio::test]
async fn test_employee_attendance_rejects_malformed_month() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "GET",
        "/api/v1/attendance/employee/EMP-001?month=march&year=2026",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["month"]);
}

#[tokio::test]
async fn test_employee_attendance_ignores_month_without_year() {
    let router = create_router_for_test();
    for date in ["2026-02-27", "2026-03-02"] {
        check_in(&router, "EMP-001", date, "09:00:00").await;
    }

    let (status, body) = send(
        &router,
        "GET",
        "/api/v1/attendance/employee/EMP-001?month=3",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalRecords"], 2);
}

#[tokio::test]
async fn test_date_attendance_ordered_by_check_in_time() {
    let router = create_router_for_test();
    check_in(&router, "EMP-001", "2026-03-02", "09:15:00").await;
    check_in(&router, "EMP-002", "2026-03-02", "08:30:00").await;
    check_in(&router, "EMP-002", "2026-03-03", "08:00:00").await;

    let (status, body) = send(&router, "GET", "/api/v1/attendance/date/2026-03-02", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "2026-03-02");
    assert_eq!(body["data"]["totalPresent"], 2);
    assert_eq!(body["data"]["records"][0]["employeeId"], "EMP-002");
    assert_eq!(body["data"]["records"][1]["employeeId"], "EMP-001");
}

// =============================================================================
// Payroll
// =============================================================================

#[tokio::test]
async fn test_generate_payroll_default_salary_line() {
    let router = create_router_for_test();
    attend_days(&router, "EMP-002", 2026, 3, 20).await;

    let (status, body) = generate(&router, 3, 2026).await;

    assert_eq!(status, StatusCode::CREATED);
    let batch = &body["data"];
    assert_eq!(batch["batchId"], "PAYROLL-MAR-2026");
    assert_eq!(batch["status"], "APPROVED");

    let line = line_for(batch, "EMP-002");
    assert_eq!(decimal_at(&line["baseSalary"]), decimal("50000"));
    assert_eq!(line["workingDays"], 22);
    assert_eq!(line["presentDays"], 20);
    assert_eq!(line["leaveDays"], 2);
    assert_eq!(decimal_at(&line["allowances"]), decimal("10000"));
    assert_eq!(decimal_at(&line["tax"]), decimal("6000"));
    assert_eq!(decimal_at(&line["deductions"]), decimal("4545.45"));
    assert_eq!(decimal_at(&line["netSalary"]), decimal("59454.55"));
    assert_eq!(line["paymentStatus"], "PENDING");
}

#[tokio::test]
async fn test_batch_covers_exactly_active_roster_and_totals_match() {
    let router = create_router_for_test();
    attend_days(&router, "EMP-001", 2026, 3, 22).await;
    attend_days(&router, "EMP-002", 2026, 3, 20).await;
    // Inactive employees still check in but are never paid.
    attend_days(&router, "EMP-004", 2026, 3, 5).await;

    let (_, body) = generate(&router, 3, 2026).await;
    let batch = &body["data"];

    let mut ids: Vec<_> = batch["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["employeeId"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["EMP-001", "EMP-002"]);
    assert_eq!(batch["totalEmployees"], 2);

    let sum: Decimal = batch["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| decimal_at(&l["netSalary"]))
        .sum();
    assert_eq!(decimal_at(&batch["totalAmount"]), sum);
    assert_eq!(sum, decimal("124254.55"));

    for line in batch["records"].as_array().unwrap() {
        let net = decimal_at(&line["baseSalary"]) + decimal_at(&line["allowances"])
            - decimal_at(&line["tax"])
            - decimal_at(&line["deductions"]);
        assert_eq!(decimal_at(&line["netSalary"]), net);
    }
}

#[tokio::test]
async fn test_generate_with_no_active_employees_returns_404() {
    let router = router_with(
        vec![
            employee("EMP-010", EmployeeStatus::Inactive),
            employee("EMP-011", EmployeeStatus::Terminated),
        ],
        PayrollPolicy::default(),
    );

    let (status, body) = generate(&router, 3, 2026).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");

    let (_, body) = send(&router, "GET", "/api/v1/payroll/batches", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_generate_requires_month_and_year() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "POST", "/api/v1/payroll/generate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["month", "year"]);
}

#[tokio::test]
async fn test_repeat_generation_is_rejected_by_default() {
    let router = create_router_for_test();

    let (status, first) = generate(&router, 3, 2026).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = generate(&router, 3, 2026).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (_, body) = send(&router, "GET", "/api/v1/payroll/batches", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, stored) = send(&router, "GET", "/api/v1/payroll/batch/PAYROLL-MAR-2026", None).await;
    assert_eq!(stored["data"]["generatedAt"], first["data"]["generatedAt"]);
}

#[tokio::test]
async fn test_repeat_generation_replaces_under_replace_policy() {
    let router = router_with(
        vec![employee("EMP-001", EmployeeStatus::Active)],
        PayrollPolicy {
            duplicate_batch_policy: DuplicateBatchPolicy::Replace,
            ..PayrollPolicy::default()
        },
    );

    generate(&router, 3, 2026).await;
    attend_days(&router, "EMP-001", 2026, 3, 22).await;
    let (status, _) = generate(&router, 3, 2026).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&router, "GET", "/api/v1/payroll/batches", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&router, "GET", "/api/v1/payroll/batch/PAYROLL-MAR-2026", None).await;
    assert_eq!(line_for(&body["data"], "EMP-001")["presentDays"], 22);
}

#[tokio::test]
async fn test_unknown_batch_returns_404() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/api/v1/payroll/batch/PAYROLL-JAN-1999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_employee_payslips_in_period_order() {
    let router = create_router_for_test();
    generate(&router, 3, 2026).await;
    generate(&router, 12, 2025).await;
    generate(&router, 1, 2026).await;

    let (status, body) = send(&router, "GET", "/api/v1/payroll/employee/EMP-001", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employeeId"], "EMP-001");
    let batch_ids: Vec<_> = body["data"]["payslips"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["batchId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        batch_ids,
        vec!["PAYROLL-DEC-2025", "PAYROLL-JAN-2026", "PAYROLL-MAR-2026"]
    );
}

#[tokio::test]
async fn test_payslips_for_unpaid_employee_are_empty() {
    let router = create_router_for_test();
    generate(&router, 3, 2026).await;

    let (status, body) = send(&router, "GET", "/api/v1/payroll/employee/EMP-003", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["payslips"].as_array().unwrap().len(), 0);
}

// =============================================================================
// Employees, health and routing
// =============================================================================

#[tokio::test]
async fn test_list_employees_with_filters() {
    let router = create_router_for_test();

    let (status, body) = send(&router, "GET", "/api/v1/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 5);

    let (_, body) = send(&router, "GET", "/api/v1/employees?status=ACTIVE", None).await;
    assert_eq!(body["data"]["total"], 2);

    let (_, body) = send(&router, "GET", "/api/v1/employees?department=HR", None).await;
    assert_eq!(body["data"]["employees"][0]["employeeId"], "EMP-003");

    let (status, _) = send(&router, "GET", "/api/v1/employees?status=RETIRED", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_employee() {
    let router = create_router_for_test();

    let (status, body) = send(&router, "GET", "/api/v1/employees/EMP-004", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ON_LEAVE");

    let (status, _) = send(&router, "GET", "/api/v1/employees/EMP-404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_unknown_endpoint() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "POST", "/api/v2/anything", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Endpoint not found");
}
