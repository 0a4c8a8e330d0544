//! Payroll batch models.
//!
//! This module contains the [`PayrollBatch`] produced by one payroll run, the
//! per-employee [`PayrollLine`] it embeds, and the [`Payslip`] view used by
//! the employee payslip query.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeSnapshot, PayrollMonth};

/// Lifecycle status of a payroll batch.
///
/// Batches move forward only: `DRAFT -> APPROVED -> PROCESSED -> COMPLETED`.
/// Generation currently creates batches directly in `APPROVED`; the later
/// transitions belong to a disbursement collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Computed but not yet reviewed.
    #[default]
    Draft,
    /// Approved for payment.
    Approved,
    /// Handed to the payment processor.
    Processed,
    /// All payments settled.
    Completed,
}

impl BatchStatus {
    /// Returns true if moving from `self` to `next` is a legal transition.
    ///
    /// # Example
    ///
    /// ```
    /// use hrms_payroll::models::BatchStatus;
    ///
    /// assert!(BatchStatus::Draft.can_transition_to(BatchStatus::Approved));
    /// assert!(!BatchStatus::Completed.can_transition_to(BatchStatus::Draft));
    /// ```
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Approved)
                | (Self::Approved, Self::Processed)
                | (Self::Processed, Self::Completed)
        )
    }
}

/// Payment status of a single payroll line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Awaiting disbursement.
    #[default]
    Pending,
    /// Submitted for payment.
    Processed,
    /// Paid out.
    Paid,
    /// Payment attempt failed.
    Failed,
}

impl PaymentStatus {
    /// Returns true if moving from `self` to `next` is a legal transition.
    ///
    /// Every terminal status is reached from `PENDING`.
    pub fn can_transition_to(self, next: Self) -> bool {
        self == Self::Pending && next != Self::Pending
    }
}

/// One employee's pay for a payroll run.
///
/// A line is a snapshot: identity fields are copied at generation time and
/// never follow later directory changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollLine {
    /// Employee identity at generation time.
    #[serde(flatten)]
    pub employee: EmployeeSnapshot,
    /// Monthly base salary used for this run.
    pub base_salary: Decimal,
    /// Allowance component.
    pub allowances: Decimal,
    /// Leave deductions. Negative when present days exceed working days.
    pub deductions: Decimal,
    /// Tax withheld.
    pub tax: Decimal,
    /// Amount payable.
    pub net_salary: Decimal,
    /// Working days assumed for the month.
    pub working_days: u32,
    /// Days with an attendance record in the month.
    pub present_days: u32,
    /// `working_days - present_days`, possibly negative.
    pub leave_days: i64,
    /// Disbursement status.
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl PayrollLine {
    /// Returns the employee id of this line.
    pub fn employee_id(&self) -> &str {
        &self.employee.employee_id
    }

    /// Gross pay before tax and deductions.
    pub fn gross_salary(&self) -> Decimal {
        self.base_salary + self.allowances
    }

    /// Checks `net = base + allowances - tax - deductions`.
    pub fn is_balanced(&self) -> bool {
        self.net_salary == self.base_salary + self.allowances - self.tax - self.deductions
    }
}

/// The persisted result of one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollBatch {
    /// `PAYROLL-<MON>-<year>`.
    pub batch_id: String,
    /// Month number, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// One line per active employee.
    pub records: Vec<PayrollLine>,
    /// Number of lines.
    pub total_employees: usize,
    /// Sum of every line's net salary.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: BatchStatus,
    /// When the batch was generated.
    pub generated_at: DateTime<Utc>,
}

impl PayrollBatch {
    /// Returns the line for `employee_id`, if the employee was paid in this run.
    pub fn line_for(&self, employee_id: &str) -> Option<&PayrollLine> {
        self.records.iter().find(|l| l.employee_id() == employee_id)
    }

    /// Ordering key for chronological listings.
    pub fn period_key(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// Header-only view of the batch.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            batch_id: self.batch_id.clone(),
            month: self.month,
            year: self.year,
            total_employees: self.total_employees,
            total_amount: self.total_amount,
            status: self.status,
            generated_at: self.generated_at,
        }
    }

    /// Returns the payslip of `employee_id` in this batch.
    pub fn payslip_for(&self, employee_id: &str) -> Option<Payslip> {
        self.line_for(employee_id).map(|line| Payslip {
            batch_id: self.batch_id.clone(),
            month: self.month,
            year: self.year,
            line: line.clone(),
        })
    }

    /// Returns true if the batch belongs to `period`.
    pub fn is_for(&self, period: &PayrollMonth) -> bool {
        self.month == period.month() && self.year == period.year()
    }
}

/// A batch header without its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// `PAYROLL-<MON>-<year>`.
    pub batch_id: String,
    /// Month number.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Number of lines.
    pub total_employees: usize,
    /// Sum of net salaries.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: BatchStatus,
    /// When the batch was generated.
    pub generated_at: DateTime<Utc>,
}

/// One employee's payroll line together with the batch it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    /// Owning batch.
    pub batch_id: String,
    /// Month of the owning batch.
    pub month: u32,
    /// Year of the owning batch.
    pub year: i32,
    /// The employee's line.
    #[serde(flatten)]
    pub line: PayrollLine,
}
