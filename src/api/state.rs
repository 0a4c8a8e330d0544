//! Application state for the HRMS API.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollPolicy};
use crate::error::HrmsResult;
use crate::service::{AttendanceLedger, EmployeeLookup, PayrollBatchGenerator, PayslipQuery};
use crate::store::{
    AttendanceStore, EmployeeDirectory, InMemoryAttendanceStore, InMemoryEmployeeDirectory,
    InMemoryPayrollStore, PayrollStore,
};

/// Shared application state.
///
/// Holds the services every handler works through. Stores are created once
/// and shared behind `Arc`, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    employees: EmployeeLookup,
    ledger: AttendanceLedger,
    generator: PayrollBatchGenerator,
    payslips: PayslipQuery,
}

impl AppState {
    /// Builds in-memory stores seeded from the loaded configuration.
    pub fn new(config: ConfigLoader) -> HrmsResult<Self> {
        let directory = Arc::new(InMemoryEmployeeDirectory::new(
            config.employees().iter().cloned(),
        ));
        Self::with_stores(
            directory,
            Arc::new(InMemoryAttendanceStore::new()),
            Arc::new(InMemoryPayrollStore::new()),
            config.policy().clone(),
        )
    }

    /// Wires the services over caller-supplied stores.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `policy` is unusable.
    pub fn with_stores(
        directory: Arc<dyn EmployeeDirectory>,
        attendance: Arc<dyn AttendanceStore>,
        payroll: Arc<dyn PayrollStore>,
        policy: PayrollPolicy,
    ) -> HrmsResult<Self> {
        let ledger = AttendanceLedger::new(directory.clone(), attendance);
        let generator =
            PayrollBatchGenerator::new(directory.clone(), ledger.clone(), payroll.clone(), policy)?;
        Ok(Self {
            employees: EmployeeLookup::new(directory),
            ledger,
            generator,
            payslips: PayslipQuery::new(payroll),
        })
    }

    /// Employee directory lookups.
    pub fn employees(&self) -> &EmployeeLookup {
        &self.employees
    }

    /// The attendance ledger.
    pub fn ledger(&self) -> &AttendanceLedger {
        &self.ledger
    }

    /// The payroll batch generator.
    pub fn generator(&self) -> &PayrollBatchGenerator {
        &self.generator
    }

    /// Batch and payslip queries.
    pub fn payslips(&self) -> &PayslipQuery {
        &self.payslips
    }
}
