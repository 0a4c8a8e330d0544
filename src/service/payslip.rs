//! Read-only queries over generated payroll batches.

use std::sync::Arc;

use tracing::debug;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{BatchSummary, PayrollBatch, Payslip};
use crate::store::PayrollStore;

/// Looks up batches and per-employee payslips.
#[derive(Clone)]
pub struct PayslipQuery {
    store: Arc<dyn PayrollStore>,
}

impl PayslipQuery {
    /// Creates a query service over `store`.
    pub fn new(store: Arc<dyn PayrollStore>) -> Self {
        Self { store }
    }

    /// Fetches a batch with all of its lines.
    ///
    /// # Errors
    ///
    /// `NotFound` if no batch has `batch_id`.
    pub async fn get_batch(&self, batch_id: &str) -> HrmsResult<PayrollBatch> {
        self.store
            .find_batch(batch_id)
            .await?
            .ok_or_else(|| HrmsError::NotFound {
                entity: "Payroll batch",
                id: batch_id.to_string(),
            })
    }

    /// Every payslip of `employee_id`, oldest period first.
    ///
    /// An employee with no payroll history gets an empty list.
    pub async fn get_employee_payslips(&self, employee_id: &str) -> HrmsResult<Vec<Payslip>> {
        let mut batches = self.store.batches_for_employee(employee_id).await?;
        batches.sort_by_key(PayrollBatch::period_key);

        let payslips: Vec<Payslip> = batches
            .iter()
            .filter_map(|batch| batch.payslip_for(employee_id))
            .collect();
        debug!(employee_id = %employee_id, count = payslips.len(), "Payslips queried");
        Ok(payslips)
    }

    /// Headers of every stored batch, oldest period first.
    pub async fn list_batches(&self) -> HrmsResult<Vec<BatchSummary>> {
        let mut batches = self.store.list_batches().await?;
        batches.sort_by_key(PayrollBatch::period_key);
        Ok(batches.iter().map(PayrollBatch::summary).collect())
    }
}
