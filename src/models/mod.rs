//! Core data models for the HRMS payroll engine.
//!
//! This module contains the domain models shared by the attendance ledger,
//! payroll generator, payslip queries, and HTTP API.

mod attendance;
mod employee;
mod pay_period;
mod payroll;

pub use attendance::{AttendanceKey, AttendanceRecord, AttendanceStatus};
pub use employee::{Employee, EmployeeSnapshot, EmployeeStatus};
pub use pay_period::{DateWindow, PayrollMonth};
pub use payroll::{BatchStatus, BatchSummary, PaymentStatus, PayrollBatch, PayrollLine, Payslip};
