//! Storage ports for the HRMS payroll engine.
//!
//! These traits define the boundary between the ledger/payroll services and
//! whatever holds the data. Uniqueness of attendance records and atomicity
//! of batch writes are guarantees of the store, not of the callers.

mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::HrmsError;
use crate::models::{AttendanceRecord, DateWindow, Employee, EmployeeStatus, PayrollBatch};

pub use memory::{InMemoryAttendanceStore, InMemoryEmployeeDirectory, InMemoryPayrollStore};

/// Errors reported by storage implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("duplicate key: {key}")]
    DuplicateKey {
        /// The colliding key.
        key: String,
    },

    /// The row to update does not exist.
    #[error("no row for key: {key}")]
    Missing {
        /// The key that was looked up.
        key: String,
    },

    /// A conditional write found the row in an unexpected state.
    #[error("precondition failed for {key}: {message}")]
    PreconditionFailed {
        /// The affected key.
        key: String,
        /// What did not hold.
        message: String,
    },

    /// Any other backend failure.
    #[error("storage backend error: {message}")]
    Backend {
        /// The raw backend message.
        message: String,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for HrmsError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateKey { key } => HrmsError::conflict(format!("Duplicate key: {}", key)),
            StoreError::PreconditionFailed { message, .. } => HrmsError::conflict(message),
            other @ (StoreError::Missing { .. } | StoreError::Backend { .. }) => {
                HrmsError::Internal {
                    message: other.to_string(),
                }
            }
        }
    }
}

/// Filter for directory listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Only employees with this status.
    pub status: Option<EmployeeStatus>,
    /// Only employees in this department.
    pub department: Option<String>,
}

impl EmployeeFilter {
    /// Returns true if `employee` passes the filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        self.status.is_none_or(|s| employee.status == s)
            && self
                .department
                .as_deref()
                .is_none_or(|d| employee.department == d)
    }
}

/// Read-only view of the external employee directory.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by id.
    async fn find(&self, employee_id: &str) -> StoreResult<Option<Employee>>;

    /// Employees with status ACTIVE, ordered by employee id.
    async fn active_roster(&self) -> StoreResult<Vec<Employee>>;

    /// Employees passing `filter`, ordered by employee id.
    async fn list(&self, filter: &EmployeeFilter) -> StoreResult<Vec<Employee>>;
}

/// Persistence for attendance records.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Inserts a new record.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if a record already exists for
    /// the same employee and date; the check and the insert are one atomic
    /// step.
    async fn insert(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord>;

    /// Fetches the record for an employee on a date.
    async fn find(&self, employee_id: &str, date: NaiveDate)
    -> StoreResult<Option<AttendanceRecord>>;

    /// Sets check-out time and working hours if the record is still open.
    ///
    /// Fails with [`StoreError::Missing`] if there is no record and with
    /// [`StoreError::PreconditionFailed`] if check-out was already recorded.
    async fn complete_check_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        check_out_time: NaiveTime,
        working_hours: Decimal,
    ) -> StoreResult<AttendanceRecord>;

    /// Records of one employee, optionally limited to a date window.
    async fn list_for_employee(
        &self,
        employee_id: &str,
        window: Option<&DateWindow>,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Records of every employee on one date.
    async fn list_for_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>>;
}

/// Persistence for payroll batches.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Stores a complete batch, failing with [`StoreError::DuplicateKey`] if
    /// one with the same id exists. Either every line is stored or none is.
    async fn insert_batch(&self, batch: PayrollBatch) -> StoreResult<PayrollBatch>;

    /// Stores a complete batch, replacing any batch with the same id.
    async fn replace_batch(&self, batch: PayrollBatch) -> StoreResult<PayrollBatch>;

    /// Fetches a batch by id.
    async fn find_batch(&self, batch_id: &str) -> StoreResult<Option<PayrollBatch>>;

    /// Every stored batch.
    async fn list_batches(&self) -> StoreResult<Vec<PayrollBatch>>;

    /// Batches containing a line for `employee_id`.
    async fn batches_for_employee(&self, employee_id: &str) -> StoreResult<Vec<PayrollBatch>>;
}
