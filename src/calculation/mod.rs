//! Calculation logic for the HRMS payroll engine.
//!
//! This module contains the pure functions behind attendance and payroll:
//! working-hours computation at check-out, per-employee payroll line
//! arithmetic, and aggregation of lines into a batch.

mod payroll_batch;
mod payroll_line;
mod working_hours;

pub use payroll_batch::assemble_batch;
pub use payroll_line::{
    calculate_leave_days, calculate_payroll_line, resolve_base_salary, round_money,
};
pub use working_hours::calculate_working_hours;
