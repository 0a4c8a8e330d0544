//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! policy and seed roster from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{HrmsError, HrmsResult};
use crate::models::Employee;

use super::types::{PayrollPolicy, RosterConfig};

/// Loads and provides access to service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/hrms/
/// ├── payroll.yaml    # Payroll rates, working days and policies
/// └── employees.yaml  # Seed roster for the employee directory
/// ```
///
/// # Example
///
/// ```no_run
/// use hrms_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hrms").unwrap();
/// println!("Working days: {}", loader.policy().working_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PayrollPolicy,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if either file is missing and
    /// `ConfigParseError` if either file contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> HrmsResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PayrollPolicy>(&path.join("payroll.yaml"))?;
        let roster = Self::load_yaml::<RosterConfig>(&path.join("employees.yaml"))?;
        Self::validate_policy(&policy, &path.join("payroll.yaml"))?;

        Ok(Self {
            policy,
            employees: roster.employees,
        })
    }

    /// Builds a loader from values already in memory.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the policy is unusable.
    pub fn from_parts(policy: PayrollPolicy, employees: Vec<Employee>) -> HrmsResult<Self> {
        policy.validate()?;
        Ok(Self { policy, employees })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> HrmsResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrmsError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| HrmsError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_policy(policy: &PayrollPolicy, path: &Path) -> HrmsResult<()> {
        policy
            .validate()
            .map_err(|err| HrmsError::ConfigParseError {
                path: path.display().to_string(),
                message: err.to_string(),
            })
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Returns the seed roster.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
