//! Application services built on the storage ports.

mod attendance;
mod employees;
mod payroll;
mod payslip;

pub use attendance::{AttendanceLedger, CheckIn, CheckOut};
pub use employees::EmployeeLookup;
pub use payroll::PayrollBatchGenerator;
pub use payslip::PayslipQuery;
