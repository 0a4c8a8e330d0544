//! In-process store implementations.
//!
//! Each store owns its collection behind a `parking_lot::RwLock`. They are
//! created once per process and shared through `Arc`; `reset` clears them
//! between tests.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::models::{AttendanceKey, AttendanceRecord, DateWindow, Employee, PayrollBatch};

use super::{
    AttendanceStore, EmployeeDirectory, EmployeeFilter, PayrollStore, StoreError, StoreResult,
};

/// Employee directory held in memory, keyed by employee id.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<BTreeMap<String, Employee>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates a directory seeded with `employees`.
    pub fn new(employees: impl IntoIterator<Item = Employee>) -> Self {
        let employees = employees
            .into_iter()
            .map(|e| (e.employee_id.clone(), e))
            .collect();
        Self {
            employees: RwLock::new(employees),
        }
    }

    /// Inserts or replaces an employee.
    pub fn upsert(&self, employee: Employee) {
        self.employees
            .write()
            .insert(employee.employee_id.clone(), employee);
    }

    /// Removes every employee.
    pub fn reset(&self) {
        self.employees.write().clear();
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn find(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.employees.read().get(employee_id).cloned())
    }

    async fn active_roster(&self) -> StoreResult<Vec<Employee>> {
        Ok(self
            .employees
            .read()
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect())
    }

    async fn list(&self, filter: &EmployeeFilter) -> StoreResult<Vec<Employee>> {
        Ok(self
            .employees
            .read()
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

/// Attendance records held in memory, unique per (employee, date).
#[derive(Debug, Default)]
pub struct InMemoryAttendanceStore {
    records: RwLock<BTreeMap<AttendanceKey, AttendanceRecord>>,
}

impl InMemoryAttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Removes every record.
    pub fn reset(&self) {
        self.records.write().clear();
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn insert(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord> {
        let key = record.key();
        match self.records.write().entry(key) {
            Entry::Occupied(existing) => Err(StoreError::DuplicateKey {
                key: existing.key().to_string(),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(record).clone()),
        }
    }

    async fn find(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let key = AttendanceKey::new(employee_id, date);
        Ok(self.records.read().get(&key).cloned())
    }

    async fn complete_check_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        check_out_time: NaiveTime,
        working_hours: Decimal,
    ) -> StoreResult<AttendanceRecord> {
        let key = AttendanceKey::new(employee_id, date);
        let mut records = self.records.write();
        let record = records.get_mut(&key).ok_or_else(|| StoreError::Missing {
            key: key.to_string(),
        })?;

        if record.is_checked_out() {
            return Err(StoreError::PreconditionFailed {
                key: key.to_string(),
                message: "Check-out already recorded".to_string(),
            });
        }

        record.check_out_time = Some(check_out_time);
        record.working_hours = working_hours;
        Ok(record.clone())
    }

    async fn list_for_employee(
        &self,
        employee_id: &str,
        window: Option<&DateWindow>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|r| r.employee_id() == employee_id)
            .filter(|r| window.is_none_or(|w| w.contains(r.date)))
            .cloned()
            .collect())
    }

    async fn list_for_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect())
    }
}

/// Payroll batches held in memory, keyed by batch id.
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    batches: RwLock<BTreeMap<String, PayrollBatch>>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored batches.
    pub fn len(&self) -> usize {
        self.batches.read().len()
    }

    /// Returns true if no batch is stored.
    pub fn is_empty(&self) -> bool {
        self.batches.read().is_empty()
    }

    /// Removes every batch.
    pub fn reset(&self) {
        self.batches.write().clear();
    }
}

#[async_trait]
impl PayrollStore for InMemoryPayrollStore {
    async fn insert_batch(&self, batch: PayrollBatch) -> StoreResult<PayrollBatch> {
        match self.batches.write().entry(batch.batch_id.clone()) {
            Entry::Occupied(existing) => Err(StoreError::DuplicateKey {
                key: existing.key().clone(),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(batch).clone()),
        }
    }

    async fn replace_batch(&self, batch: PayrollBatch) -> StoreResult<PayrollBatch> {
        self.batches
            .write()
            .insert(batch.batch_id.clone(), batch.clone());
        Ok(batch)
    }

    async fn find_batch(&self, batch_id: &str) -> StoreResult<Option<PayrollBatch>> {
        Ok(self.batches.read().get(batch_id).cloned())
    }

    async fn list_batches(&self) -> StoreResult<Vec<PayrollBatch>> {
        Ok(self.batches.read().values().cloned().collect())
    }

    async fn batches_for_employee(&self, employee_id: &str) -> StoreResult<Vec<PayrollBatch>> {
        Ok(self
            .batches
            .read()
            .values()
            .filter(|b| b.line_for(employee_id).is_some())
            .cloned()
            .collect())
    }
}
