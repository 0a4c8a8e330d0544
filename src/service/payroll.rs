//! Payroll batch generation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::calculation::{assemble_batch, calculate_payroll_line};
use crate::config::{DuplicateBatchPolicy, PayrollPolicy};
use crate::error::{HrmsError, HrmsResult};
use crate::models::{PayrollBatch, PayrollMonth};
use crate::store::{EmployeeDirectory, PayrollStore, StoreError};

use super::AttendanceLedger;

/// Produces one payroll batch per month from the active roster and the
/// attendance ledger.
#[derive(Clone)]
pub struct PayrollBatchGenerator {
    directory: Arc<dyn EmployeeDirectory>,
    ledger: AttendanceLedger,
    store: Arc<dyn PayrollStore>,
    policy: PayrollPolicy,
}

impl PayrollBatchGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `policy` is unusable.
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        ledger: AttendanceLedger,
        store: Arc<dyn PayrollStore>,
        policy: PayrollPolicy,
    ) -> HrmsResult<Self> {
        policy.validate()?;
        Ok(Self {
            directory,
            ledger,
            store,
            policy,
        })
    }

    /// The policy this generator applies.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Generates and persists the batch for `period`.
    ///
    /// Every active employee gets exactly one line. The batch is computed in
    /// full before it is handed to the store in a single write, so a failure
    /// at any step leaves nothing persisted.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no employee is active.
    /// - `Conflict` if a batch for `period` exists and the duplicate policy
    ///   is [`DuplicateBatchPolicy::Reject`].
    /// - `Internal` if an amount falls outside the decimal range.
    pub async fn generate(&self, period: PayrollMonth) -> HrmsResult<PayrollBatch> {
        let roster = self.directory.active_roster().await?;
        if roster.is_empty() {
            warn!(period = %period, "Payroll requested with no active employees");
            return Err(HrmsError::NotFound {
                entity: "Active employees",
                id: period.to_string(),
            });
        }

        let mut lines = Vec::with_capacity(roster.len());
        for employee in &roster {
            let records = self
                .ledger
                .query_by_employee_and_window(&employee.employee_id, &period)
                .await?;
            let present_days = u32::try_from(records.len()).map_err(|_| HrmsError::Internal {
                message: format!(
                    "attendance count overflow for employee {}",
                    employee.employee_id
                ),
            })?;
            lines.push(calculate_payroll_line(employee, present_days, &self.policy)?);
        }

        let batch = assemble_batch(&period, lines, Utc::now())?;
        let batch = self.persist(batch).await?;

        info!(
            batch_id = %batch.batch_id,
            total_employees = batch.total_employees,
            total_amount = %batch.total_amount,
            "Payroll batch generated"
        );
        Ok(batch)
    }

    async fn persist(&self, batch: PayrollBatch) -> HrmsResult<PayrollBatch> {
        match self.policy.duplicate_batch_policy {
            DuplicateBatchPolicy::Reject => match self.store.insert_batch(batch).await {
                Ok(batch) => Ok(batch),
                Err(StoreError::DuplicateKey { key }) => {
                    warn!(batch_id = %key, "Duplicate payroll generation rejected");
                    Err(HrmsError::conflict(format!(
                        "Payroll batch {} has already been generated",
                        key
                    )))
                }
                Err(err) => Err(err.into()),
            },
            DuplicateBatchPolicy::Replace => {
                let batch_id = batch.batch_id.clone();
                let batch = self.store.replace_batch(batch).await?;
                info!(batch_id = %batch_id, "Payroll batch written with replace policy");
                Ok(batch)
            }
        }
    }
}
