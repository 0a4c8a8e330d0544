//! Configuration types for payroll generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files in the configuration directory.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{HrmsError, HrmsResult};
use crate::models::Employee;

/// What to do when a batch for the same month is generated twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateBatchPolicy {
    /// Fail the second generation with a conflict.
    #[default]
    Reject,
    /// Overwrite the stored batch with the newly computed one.
    Replace,
}

/// Rates and constants used to compute payroll lines.
///
/// Loaded from `payroll.yaml`; every field is optional and falls back to the
/// values in [`PayrollPolicy::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PayrollPolicy {
    /// Working days assumed in every month.
    pub working_days: u32,
    /// Base salary for employees without one on file.
    pub default_salary: Decimal,
    /// Allowances as a fraction of base salary.
    pub allowance_rate: Decimal,
    /// Tax as a fraction of gross salary.
    pub tax_rate: Decimal,
    /// Clamp leave days at zero instead of paying a bonus for extra days.
    pub clamp_leave_days: bool,
    /// Behaviour on repeated generation for the same month.
    pub duplicate_batch_policy: DuplicateBatchPolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            working_days: 22,
            default_salary: Decimal::new(50000, 0),
            allowance_rate: Decimal::new(20, 2),
            tax_rate: Decimal::new(10, 2),
            clamp_leave_days: false,
            duplicate_batch_policy: DuplicateBatchPolicy::Reject,
        }
    }
}

impl PayrollPolicy {
    /// Checks the policy can be used to compute payroll lines.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `working_days` is zero.
    pub fn validate(&self) -> HrmsResult<()> {
        if self.working_days == 0 {
            return Err(HrmsError::invalid_field(
                "working_days",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Seed roster file structure (`employees.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    /// Employees loaded into the directory at startup.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// Process-level settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Directory holding `payroll.yaml` and `employees.yaml`.
    pub config_dir: String,
}

impl ServerSettings {
    /// Default bind address.
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:3000";
    /// Default configuration directory.
    pub const DEFAULT_CONFIG_DIR: &'static str = "./config/hrms";

    /// Reads `HRMS_BIND_ADDR` and `HRMS_CONFIG_DIR`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("HRMS_BIND_ADDR")
                .unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_string()),
            config_dir: lookup("HRMS_CONFIG_DIR")
                .unwrap_or_else(|| Self::DEFAULT_CONFIG_DIR.to_string()),
        }
    }
}
