//! Employee model and the snapshot captured into historical records.
//!
//! Employees are owned by the external employee directory; this crate only
//! reads them. Anything that outlives a single request (attendance records,
//! payroll lines) stores an [`EmployeeSnapshot`] instead of a reference so
//! later directory edits never rewrite history.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employment status as tracked by the employee directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    /// Currently employed and included in payroll runs.
    #[default]
    Active,
    /// Not currently working, excluded from payroll.
    Inactive,
    /// On extended leave, excluded from payroll.
    OnLeave,
    /// Employment ended.
    Terminated,
}

impl EmployeeStatus {
    /// Returns the wire representation (e.g. `ON_LEAVE`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::OnLeave => "ON_LEAVE",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "ON_LEAVE" => Ok(Self::OnLeave),
            "TERMINATED" => Ok(Self::Terminated),
            other => Err(format!("unknown employee status '{}'", other)),
        }
    }
}

/// An employee as exposed by the employee directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Stable directory key (e.g. "EMP-001").
    pub employee_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Job title.
    pub position: String,
    /// Annual base salary. `None` (or zero) falls back to the payroll default.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns "first last".
    ///
    /// # Examples
    ///
    /// ```
    /// use hrms_payroll::models::{Employee, EmployeeStatus};
    ///
    /// let employee = Employee {
    ///     employee_id: "EMP-001".to_string(),
    ///     first_name: "Alice".to_string(),
    ///     last_name: "Nguyen".to_string(),
    ///     department: "Engineering".to_string(),
    ///     position: "Backend Engineer".to_string(),
    ///     salary: None,
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert_eq!(employee.full_name(), "Alice Nguyen");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the employee takes part in payroll runs.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Captures the identity fields that historical records keep.
    pub fn snapshot(&self) -> EmployeeSnapshot {
        EmployeeSnapshot {
            employee_id: self.employee_id.clone(),
            employee_name: self.full_name(),
            department: self.department.clone(),
            position: self.position.clone(),
        }
    }
}

/// Employee identity frozen at the moment a record was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSnapshot {
    /// Directory key of the employee.
    pub employee_id: String,
    /// Full name at capture time.
    pub employee_name: String,
    /// Department at capture time.
    pub department: String,
    /// Position at capture time.
    pub position: String,
}
