//! Read access to the employee directory.

use std::sync::Arc;

use crate::error::{HrmsError, HrmsResult};
use crate::models::Employee;
use crate::store::{EmployeeDirectory, EmployeeFilter};

/// Thin lookup layer over an [`EmployeeDirectory`].
#[derive(Clone)]
pub struct EmployeeLookup {
    directory: Arc<dyn EmployeeDirectory>,
}

impl EmployeeLookup {
    /// Creates a lookup over `directory`.
    pub fn new(directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { directory }
    }

    /// Fetches one employee.
    pub async fn get(&self, employee_id: &str) -> HrmsResult<Employee> {
        self.directory
            .find(employee_id)
            .await?
            .ok_or_else(|| HrmsError::NotFound {
                entity: "Employee",
                id: employee_id.to_string(),
            })
    }

    /// Employees matching `filter`, ordered by id.
    pub async fn list(&self, filter: &EmployeeFilter) -> HrmsResult<Vec<Employee>> {
        Ok(self.directory.list(filter).await?)
    }
}
