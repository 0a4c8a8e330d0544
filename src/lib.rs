//! Attendance ledger and monthly payroll engine for the HRMS platform.
//!
//! Employees check in and out once per day; at month end a payroll batch
//! is generated for every active employee from the attendance count, and
//! payslips are served from the stored batches.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
