//! Attendance ledger: check-in, check-out and attendance queries.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_working_hours;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{AttendanceRecord, AttendanceStatus, PayrollMonth};
use crate::store::{AttendanceStore, EmployeeDirectory, StoreError};

/// A validated check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    /// The employee checking in.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// Time of day of the check-in.
    pub check_in_time: NaiveTime,
    /// Where the check-in happened.
    pub location: String,
}

/// A validated check-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOut {
    /// The employee checking out.
    pub employee_id: String,
    /// The calendar day of the matching check-in.
    pub date: NaiveDate,
    /// Time of day of the check-out.
    pub check_out_time: NaiveTime,
}

/// Owns the per-employee, per-day attendance records.
#[derive(Clone)]
pub struct AttendanceLedger {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn AttendanceStore>,
}

impl AttendanceLedger {
    /// Creates a ledger over the given directory and store.
    pub fn new(directory: Arc<dyn EmployeeDirectory>, store: Arc<dyn AttendanceStore>) -> Self {
        Self { directory, store }
    }

    /// Records a check-in.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the employee is not in the directory.
    /// - `Conflict` if the employee already has a record for the date.
    pub async fn record_check_in(&self, check_in: CheckIn) -> HrmsResult<AttendanceRecord> {
        let employee = self
            .directory
            .find(&check_in.employee_id)
            .await?
            .ok_or_else(|| HrmsError::NotFound {
                entity: "Employee",
                id: check_in.employee_id.clone(),
            })?;

        let record = AttendanceRecord {
            record_id: format!("ATT-{}", Uuid::new_v4()),
            employee: employee.snapshot(),
            date: check_in.date,
            check_in_time: check_in.check_in_time,
            check_out_time: None,
            location: check_in.location,
            status: AttendanceStatus::Present,
            working_hours: Decimal::ZERO,
            timestamp: Utc::now(),
        };

        match self.store.insert(record).await {
            Ok(record) => {
                info!(
                    employee_id = %record.employee_id(),
                    date = %record.date,
                    record_id = %record.record_id,
                    "Check-in recorded"
                );
                Ok(record)
            }
            Err(StoreError::DuplicateKey { key }) => {
                warn!(key = %key, "Duplicate check-in rejected");
                Err(HrmsError::conflict("Attendance already recorded for this date"))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Records the check-out of an open attendance record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if there is no check-in for the employee on the date.
    /// - `Conflict` if check-out was already recorded.
    pub async fn record_check_out(&self, check_out: CheckOut) -> HrmsResult<AttendanceRecord> {
        let existing = self
            .store
            .find(&check_out.employee_id, check_out.date)
            .await?
            .ok_or_else(|| HrmsError::NotFound {
                entity: "Check-in record",
                id: format!("{} on {}", check_out.employee_id, check_out.date),
            })?;

        if existing.is_checked_out() {
            return Err(HrmsError::conflict("Check-out already recorded"));
        }

        let working_hours = calculate_working_hours(
            check_out.date,
            existing.check_in_time,
            check_out.check_out_time,
        );
        if working_hours.is_sign_negative() {
            warn!(
                employee_id = %check_out.employee_id,
                date = %check_out.date,
                working_hours = %working_hours,
                "Check-out precedes check-in"
            );
        }

        let record = self
            .store
            .complete_check_out(
                &check_out.employee_id,
                check_out.date,
                check_out.check_out_time,
                working_hours,
            )
            .await
            .map_err(|err| match err {
                StoreError::PreconditionFailed { .. } => {
                    HrmsError::conflict("Check-out already recorded")
                }
                other => other.into(),
            })?;

        info!(
            employee_id = %record.employee_id(),
            date = %record.date,
            working_hours = %record.working_hours,
            "Check-out recorded"
        );
        Ok(record)
    }

    /// Records of one employee inside the month window, in storage order.
    pub async fn query_by_employee_and_window(
        &self,
        employee_id: &str,
        period: &PayrollMonth,
    ) -> HrmsResult<Vec<AttendanceRecord>> {
        let window = period.attendance_window();
        let records = self
            .store
            .list_for_employee(employee_id, Some(&window))
            .await?;
        debug!(
            employee_id = %employee_id,
            window_start = window.start(),
            window_end = window.end(),
            count = records.len(),
            "Attendance window queried"
        );
        Ok(records)
    }

    /// Attendance history of one employee, newest date first.
    ///
    /// When `period` is given only that month's window is returned.
    pub async fn query_by_employee(
        &self,
        employee_id: &str,
        period: Option<&PayrollMonth>,
    ) -> HrmsResult<Vec<AttendanceRecord>> {
        let window = period.map(PayrollMonth::attendance_window);
        let mut records = self
            .store
            .list_for_employee(employee_id, window.as_ref())
            .await?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    /// Every record on `date`, earliest check-in first.
    pub async fn query_by_date(&self, date: NaiveDate) -> HrmsResult<Vec<AttendanceRecord>> {
        let mut records = self.store.list_for_date(date).await?;
        records.sort_by(|a, b| {
            a.check_in_time
                .cmp(&b.check_in_time)
                .then_with(|| a.employee_id().cmp(b.employee_id()))
        });
        Ok(records)
    }
}
