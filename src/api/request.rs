//! Request schemas for the HRMS API.
//!
//! Every body and query field is optional on the wire so that a request with
//! several missing fields is answered with all of them at once. Each schema
//! validates into a typed command before any side effect happens.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, HrmsError, HrmsResult};
use crate::models::{EmployeeStatus, PayrollMonth};
use crate::service::{CheckIn, CheckOut};
use crate::store::EmployeeFilter;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Body of `POST /attendance/checkin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    /// Employee identifier.
    pub employee_id: Option<String>,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Time of day, `HH:MM:SS` or `HH:MM`.
    pub check_in_time: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
}

/// Body of `POST /attendance/checkout`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRequest {
    /// Employee identifier.
    pub employee_id: Option<String>,
    /// Calendar day of the matching check-in, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Time of day, `HH:MM:SS` or `HH:MM`.
    pub check_out_time: Option<String>,
}

/// Body of `POST /payroll/generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// Month number, 1 to 12.
    pub month: Option<u32>,
    /// Four-digit year.
    pub year: Option<i32>,
}

/// Query string of `GET /attendance/employee/:employeeId`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    /// Month number as text.
    pub month: Option<String>,
    /// Year as text.
    pub year: Option<String>,
}

/// Query string of `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListQuery {
    /// Status name, e.g. `ACTIVE`.
    pub status: Option<String>,
    /// Exact department name.
    pub department: Option<String>,
}

/// Collects required fields, remembering every one that is absent or blank.
#[derive(Default)]
struct Required {
    missing: Vec<FieldError>,
}

impl Required {
    fn take(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => {
                self.missing.push(FieldError::missing(field));
                String::new()
            }
        }
    }

    fn take_copy<T: Copy + Default>(&mut self, field: &str, value: Option<T>) -> T {
        value.unwrap_or_else(|| {
            self.missing.push(FieldError::missing(field));
            T::default()
        })
    }

    fn finish(self) -> HrmsResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(HrmsError::Validation {
                errors: self.missing,
            })
        }
    }
}

/// Parses a `YYYY-MM-DD` date, reporting failures against `field`.
pub fn parse_date(field: &str, value: &str) -> HrmsResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| HrmsError::invalid_field(field, "must be a date in YYYY-MM-DD format"))
}

/// Parses `HH:MM:SS` or `HH:MM`, reporting failures against `field`.
pub fn parse_time(field: &str, value: &str) -> HrmsResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| HrmsError::invalid_field(field, "must be a time in HH:MM:SS format"))
}

impl TryFrom<CheckInRequest> for CheckIn {
    type Error = HrmsError;

    fn try_from(req: CheckInRequest) -> HrmsResult<Self> {
        let mut required = Required::default();
        let employee_id = required.take("employeeId", req.employee_id);
        let date = required.take("date", req.date);
        let check_in_time = required.take("checkInTime", req.check_in_time);
        let location = required.take("location", req.location);
        required.finish()?;

        Ok(CheckIn {
            employee_id,
            date: parse_date("date", &date)?,
            check_in_time: parse_time("checkInTime", &check_in_time)?,
            location,
        })
    }
}

impl TryFrom<CheckOutRequest> for CheckOut {
    type Error = HrmsError;

    fn try_from(req: CheckOutRequest) -> HrmsResult<Self> {
        let mut required = Required::default();
        let employee_id = required.take("employeeId", req.employee_id);
        let date = required.take("date", req.date);
        let check_out_time = required.take("checkOutTime", req.check_out_time);
        required.finish()?;

        Ok(CheckOut {
            employee_id,
            date: parse_date("date", &date)?,
            check_out_time: parse_time("checkOutTime", &check_out_time)?,
        })
    }
}

impl TryFrom<GeneratePayrollRequest> for PayrollMonth {
    type Error = HrmsError;

    fn try_from(req: GeneratePayrollRequest) -> HrmsResult<Self> {
        let mut required = Required::default();
        let month = required.take_copy("month", req.month);
        let year = required.take_copy("year", req.year);
        required.finish()?;

        PayrollMonth::new(month, year)
    }
}

impl AttendanceQuery {
    /// The requested month, if any.
    ///
    /// The filter applies only when both `month` and `year` are given; a
    /// lone `month` or `year` is ignored and the full history is returned.
    pub fn period(&self) -> HrmsResult<Option<PayrollMonth>> {
        let month = self.month.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let year = self.year.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (month, year) {
            (Some(month), Some(year)) => {
                let month: u32 = month
                    .parse()
                    .map_err(|_| HrmsError::invalid_field("month", "must be a number"))?;
                let year: i32 = year
                    .parse()
                    .map_err(|_| HrmsError::invalid_field("year", "must be a number"))?;
                PayrollMonth::new(month, year).map(Some)
            }
            _ => Ok(None),
        }
    }
}

impl TryFrom<EmployeeListQuery> for EmployeeFilter {
    type Error = HrmsError;

    fn try_from(query: EmployeeListQuery) -> HrmsResult<Self> {
        let status = query
            .status
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<EmployeeStatus>())
            .transpose()
            .map_err(|message| HrmsError::invalid_field("status", message))?;

        Ok(EmployeeFilter {
            status,
            department: query.department.filter(|d| !d.trim().is_empty()),
        })
    }
}
