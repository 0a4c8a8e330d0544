//! Attendance record model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeSnapshot;

/// Attendance classification of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Checked in for the day.
    #[default]
    Present,
    /// Marked absent.
    Absent,
    /// Worked half a day.
    HalfDay,
    /// Checked in late.
    Late,
    /// On approved leave.
    OnLeave,
}

/// Unique key of an attendance record: one record per employee per day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttendanceKey {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
}

impl AttendanceKey {
    /// Creates a key.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
        }
    }
}

impl std::fmt::Display for AttendanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.employee_id, self.date)
    }
}

/// A single day of attendance for one employee.
///
/// Created at check-in with no check-out time and zero working hours, then
/// completed exactly once at check-out. No operation mutates a completed
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Unique record identifier (e.g. "ATT-6f1c...").
    pub record_id: String,
    /// Employee identity captured at check-in.
    #[serde(flatten)]
    pub employee: EmployeeSnapshot,
    /// The calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Time of day the employee checked in.
    pub check_in_time: NaiveTime,
    /// Time of day the employee checked out, once recorded.
    pub check_out_time: Option<NaiveTime>,
    /// Where the check-in happened.
    pub location: String,
    /// Attendance classification.
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Hours between check-in and check-out, zero until check-out.
    pub working_hours: Decimal,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Returns the uniqueness key of this record.
    pub fn key(&self) -> AttendanceKey {
        AttendanceKey::new(self.employee.employee_id.clone(), self.date)
    }

    /// Returns the employee id.
    pub fn employee_id(&self) -> &str {
        &self.employee.employee_id
    }

    /// Returns true once check-out has been recorded.
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}
